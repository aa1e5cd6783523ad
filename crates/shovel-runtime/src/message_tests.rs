//! Tests for message and receipt types.

use super::*;

mod message_ids {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = MessageId::new();
        let b = MessageId::new();

        assert_ne!(a, b, "Generated message IDs should be unique");
    }

    #[test]
    fn test_id_round_trips_through_string() {
        let id = MessageId::from("provider-assigned-id".to_string());

        assert_eq!(id.as_str(), "provider-assigned-id");
        assert_eq!(id.to_string(), "provider-assigned-id");
    }
}

mod messages {
    use super::*;

    #[test]
    fn test_new_takes_anything_bytes_like() {
        let from_str = Message::new("payload");
        let from_vec = Message::new(b"payload".to_vec());

        assert_eq!(from_str, from_vec);
    }

    /// Forwarding a received message reuses the body untouched.
    #[test]
    fn test_received_message_converts_back_to_message() {
        let received = ReceivedMessage {
            message_id: MessageId::new(),
            body: "payload".into(),
            receipt_handle: ReceiptHandle::new("r-1".to_string()),
        };

        assert_eq!(received.message(), Message::new("payload"));
    }
}

mod receipt_handles {
    use super::*;

    #[test]
    fn test_handle_accessor_and_display_agree() {
        let receipt = ReceiptHandle::new("r-42".to_string());

        assert_eq!(receipt.handle(), "r-42");
        assert_eq!(receipt.to_string(), "r-42");
    }

    /// Two deliveries of the same body get distinct receipts; equality is
    /// on the handle, not the message.
    #[test]
    fn test_receipts_compare_by_handle() {
        let a = ReceiptHandle::new("r-1".to_string());
        let b = ReceiptHandle::new("r-2".to_string());

        assert_ne!(a, b);
        assert_eq!(a, ReceiptHandle::new("r-1".to_string()));
    }
}
