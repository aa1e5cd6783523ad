//! Tests for transport error types.

use super::*;

mod display_formatting {
    use super::*;

    #[test]
    fn test_queue_not_found_includes_url() {
        let err = QueueError::QueueNotFound {
            queue_url: "https://sqs.us-east-1.amazonaws.com/1/missing".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Queue not found: https://sqs.us-east-1.amazonaws.com/1/missing"
        );
    }

    #[test]
    fn test_message_not_found_includes_receipt() {
        let err = QueueError::MessageNotFound {
            receipt: "receipt-123".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Message not found or receipt expired: receipt-123"
        );
    }

    #[test]
    fn test_provider_error_includes_code_and_message() {
        let err = QueueError::ProviderError {
            provider: "AwsSqs".to_string(),
            code: "ServiceUnavailable".to_string(),
            message: "try again".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Provider error (AwsSqs): ServiceUnavailable - try again"
        );
    }
}

mod endpoint_errors {
    use super::*;

    #[test]
    fn test_endpoint_error_display_names_the_rule() {
        let err = EndpointError::TooFewSegments {
            url: "bad".to_string(),
        };
        assert!(err.to_string().contains("slash-separated"));

        let err = EndpointError::MalformedHost {
            url: "https://bad".to_string(),
        };
        assert!(err.to_string().contains("service.region.provider.tld"));
    }

    #[test]
    fn test_endpoint_errors_are_comparable() {
        let a = EndpointError::TooFewSegments {
            url: "bad".to_string(),
        };
        let b = EndpointError::TooFewSegments {
            url: "bad".to_string(),
        };

        assert_eq!(a, b);
    }
}
