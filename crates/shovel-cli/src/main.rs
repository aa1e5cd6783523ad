use shovel_cli::{exit_code, run_cli};
use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        // Render the diagnostic context and cause chain deterministically
        let context = err
            .context_fields()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(" ");

        let mut causes = Vec::new();
        let mut cause = std::error::Error::source(&err);
        while let Some(current) = cause {
            causes.push(current.to_string());
            cause = current.source();
        }

        error!(
            error = %err,
            cause = %causes.join(": "),
            %context,
            "exit with error"
        );

        std::process::exit(exit_code(&err));
    }
}
