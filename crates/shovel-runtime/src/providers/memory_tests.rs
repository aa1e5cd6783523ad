//! Tests for the in-memory queue provider.

use super::*;

const SRC: &str = "https://sqs.ap-northeast-1.amazonaws.com/111111111111/src-queue";
const DST: &str = "https://sqs.us-east-1.amazonaws.com/222222222222/dst-queue";

// ============================================================================
// Queue Behavior Tests
// ============================================================================

mod queue_behavior {
    use super::*;

    /// Queues come into existence on first use, keyed by URL.
    #[tokio::test]
    async fn test_queues_are_created_on_first_use() {
        let client = InMemoryClient::default();

        client
            .send_message(SRC, Message::new("a"))
            .await
            .expect("send should succeed");

        assert_eq!(client.queued_bodies(SRC).await, vec!["a"]);
        assert!(client.queued_bodies(DST).await.is_empty());
    }

    /// Default configuration delivers one message per poll.
    #[tokio::test]
    async fn test_default_poll_delivers_one_message() {
        let client = InMemoryClient::default();
        client.push_message(SRC, "a").await;
        client.push_message(SRC, "b").await;

        let first = client.receive_messages(SRC).await.expect("receive");
        let second = client.receive_messages(SRC).await.expect("receive");
        let third = client.receive_messages(SRC).await.expect("receive");

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].body, "a");
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].body, "b");
        assert!(third.is_empty(), "Drained queue should poll empty");
    }

    #[tokio::test]
    async fn test_configured_batch_size_is_honored() {
        let client = InMemoryClient::new(InMemoryConfig {
            messages_per_poll: 10,
        });
        for body in ["a", "b", "c"] {
            client.push_message(SRC, body).await;
        }

        let batch = client.receive_messages(SRC).await.expect("receive");

        assert_eq!(batch.len(), 3, "One poll should return the whole queue");
        let bodies: Vec<_> = batch.iter().map(|m| m.body.clone()).collect();
        assert_eq!(bodies, vec!["a", "b", "c"]);
    }

    /// Each delivery mints a fresh receipt.
    #[tokio::test]
    async fn test_deliveries_get_distinct_receipts() {
        let client = InMemoryClient::default();
        client.push_message(SRC, "a").await;
        client.push_message(SRC, "b").await;

        let first = client.receive_messages(SRC).await.expect("receive");
        let second = client.receive_messages(SRC).await.expect("receive");

        assert_ne!(first[0].receipt_handle, second[0].receipt_handle);
    }

    #[tokio::test]
    async fn test_delete_removes_only_the_receipted_delivery() {
        let client = InMemoryClient::default();
        client.push_message(SRC, "a").await;
        client.push_message(SRC, "b").await;

        let delivered = client.receive_messages(SRC).await.expect("receive");
        client
            .delete_message(SRC, &delivered[0].receipt_handle)
            .await
            .expect("delete should succeed");

        assert_eq!(client.queued_bodies(SRC).await, vec!["b"]);
    }

    #[tokio::test]
    async fn test_delete_with_unknown_receipt_fails() {
        let client = InMemoryClient::default();
        client.push_message(SRC, "a").await;

        let result = client
            .delete_message(SRC, &ReceiptHandle::new("never-issued".to_string()))
            .await;

        assert!(matches!(
            result,
            Err(QueueError::MessageNotFound { .. })
        ));
        assert_eq!(client.queued_bodies(SRC).await, vec!["a"]);
    }
}

// ============================================================================
// Call Recording Tests
// ============================================================================

mod call_recording {
    use super::*;

    #[tokio::test]
    async fn test_every_invocation_is_recorded_with_arguments() {
        let client = InMemoryClient::default();
        client.push_message(SRC, "a").await;

        let delivered = client.receive_messages(SRC).await.expect("receive");
        client
            .send_message(DST, delivered[0].message())
            .await
            .expect("send");
        client
            .delete_message(SRC, &delivered[0].receipt_handle)
            .await
            .expect("delete");

        let calls = client.calls().await;
        assert_eq!(
            calls.receives,
            vec![ReceiveCall {
                queue_url: SRC.to_string()
            }]
        );
        assert_eq!(
            calls.sends,
            vec![SendCall {
                queue_url: DST.to_string(),
                body: "a".into()
            }]
        );
        assert_eq!(
            calls.deletes,
            vec![DeleteCall {
                queue_url: SRC.to_string(),
                receipt: delivered[0].receipt_handle.handle().to_string()
            }]
        );
    }

    /// Failed invocations are still recorded; the log mirrors what the
    /// caller attempted, not what succeeded.
    #[tokio::test]
    async fn test_failed_calls_are_recorded() {
        let client = InMemoryClient::default();
        client.fail_sends_after(0).await;

        let result = client.send_message(DST, Message::new("a")).await;

        assert!(result.is_err());
        assert_eq!(client.calls().await.sends.len(), 1);
        assert!(client.queued_bodies(DST).await.is_empty());
    }
}

// ============================================================================
// Failure Injection Tests
// ============================================================================

mod failure_injection {
    use super::*;

    #[tokio::test]
    async fn test_send_budget_counts_successes() {
        let client = InMemoryClient::default();
        client.fail_sends_after(1).await;

        client
            .send_message(DST, Message::new("a"))
            .await
            .expect("first send within budget");
        let second = client.send_message(DST, Message::new("b")).await;

        assert!(matches!(
            second,
            Err(QueueError::ConnectionFailed { .. })
        ));
        assert_eq!(client.queued_bodies(DST).await, vec!["a"]);
    }

    #[tokio::test]
    async fn test_receive_failure_leaves_queue_intact() {
        let client = InMemoryClient::default();
        client.push_message(SRC, "a").await;
        client.fail_receives_after(0).await;

        let result = client.receive_messages(SRC).await;

        assert!(result.is_err());
        assert_eq!(client.queued_bodies(SRC).await, vec!["a"]);
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_message_queued() {
        let client = InMemoryClient::default();
        client.push_message(SRC, "a").await;
        client.fail_deletes_after(0).await;

        let delivered = client.receive_messages(SRC).await.expect("receive");
        let result = client
            .delete_message(SRC, &delivered[0].receipt_handle)
            .await;

        assert!(result.is_err());
        assert_eq!(client.queued_bodies(SRC).await, vec!["a"]);
    }
}
