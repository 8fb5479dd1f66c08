#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::api::ApiClient;
    use crate::clipboard::{copy_with_fallback, ButtonFeedback, ClipboardBackend, CopyOutcome, FeedbackState};
    use crate::controllers::FilesController;
    use crate::error::ConsoleError;

    struct Broken;

    #[async_trait]
    impl ClipboardBackend for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn write_text(&self, _text: &str) -> anyhow::Result<()> {
            anyhow::bail!("clipboard unavailable")
        }
    }

    #[derive(Default)]
    struct Recording {
        copied: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ClipboardBackend for Recording {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn write_text(&self, text: &str) -> anyhow::Result<()> {
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_first_working_backend_wins() {
        let first = Recording::default();
        let second = Recording::default();
        let backends: [&dyn ClipboardBackend; 2] = [&first, &second];

        let outcome = copy_with_fallback(&backends, "drive-1").await.unwrap();
        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(*first.copied.lock().unwrap(), vec!["drive-1".to_string()]);
        assert!(second.copied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_falls_through_failing_backend() {
        let fallback = Recording::default();
        let backends: [&dyn ClipboardBackend; 2] = [&Broken, &fallback];

        let outcome = copy_with_fallback(&backends, "drive-2").await.unwrap();
        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(*fallback.copied.lock().unwrap(), vec!["drive-2".to_string()]);
    }

    #[tokio::test]
    async fn test_manual_when_everything_fails() {
        let backends: [&dyn ClipboardBackend; 2] = [&Broken, &Broken];
        let outcome = copy_with_fallback(&backends, "drive-3").await.unwrap();
        assert_eq!(outcome, CopyOutcome::Manual("drive-3".to_string()));
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let recording = Recording::default();
        let backends: [&dyn ClipboardBackend; 1] = [&recording];
        let result = copy_with_fallback(&backends, "").await;
        assert!(matches!(result, Err(ConsoleError::InvalidInput(_))));
        assert!(recording.copied.lock().unwrap().is_empty());
    }

    #[test]
    fn test_feedback_for_copied() {
        let feedback = ButtonFeedback::for_outcome(&CopyOutcome::Copied);
        assert_eq!(feedback.label, "Copied!");
        assert_eq!(feedback.state, FeedbackState::Success);
        assert_eq!(feedback.hint, None);
        assert_eq!(feedback.revert_after, Duration::from_millis(1000));
    }

    #[test]
    fn test_feedback_for_manual_copy() {
        let feedback = ButtonFeedback::for_outcome(&CopyOutcome::Manual("drive-9".into()));
        assert_eq!(feedback.label, "Manual Copy");
        assert_eq!(feedback.state, FeedbackState::Warning);
        assert_eq!(feedback.hint.as_deref(), Some("Please copy this text manually: drive-9"));
        assert_eq!(feedback.revert_after, Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_copy_id_from_listing() {
        let client = ApiClient::new("http://127.0.0.1:9", None).unwrap();
        let files = FilesController::new(client, 50);

        let recording = Recording::default();
        let backends: [&dyn ClipboardBackend; 1] = [&recording];
        let feedback = files.copy_id_with(&backends, "drive-42").await.unwrap();
        assert_eq!(feedback.label, "Copied!");
        assert_eq!(*recording.copied.lock().unwrap(), vec!["drive-42".to_string()]);

        let broken: [&dyn ClipboardBackend; 1] = [&Broken];
        let feedback = files.copy_id_with(&broken, "drive-42").await.unwrap();
        assert_eq!(feedback.state, FeedbackState::Warning);
    }
}
