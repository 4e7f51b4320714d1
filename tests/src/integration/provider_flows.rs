//! # Provider Flows
//!
//! The platform calling into the app:
//!
//! 1. Registration sends `{"listen": true}` once per capability
//! 2. Calls are answered with the platform's own id
//! 3. Bad params, unknown capabilities and handler failures become error replies
//! 4. A provider waiting on the user never blocks ordinary calls

#[cfg(test)]
mod tests {
    use crate::harness::MockPlatform;
    use async_trait::async_trait;
    use firebolt_gateway::{FireboltError, FireboltResult, Registration};
    use firebolt_sdk::acknowledge_challenge::{
        self, AcknowledgeChallengeProvider, Challenge, GrantResult,
    };
    use firebolt_sdk::keyboard::{self, KeyboardInput, KeyboardRequest};
    use firebolt_sdk::pin_challenge::{
        self, PinChallenge, PinChallengeProvider, PinChallengeResult, PinSpace, ResultReason,
    };
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    const PASSWORD_EVENT: &str = "keyboard.onRequestPassword";
    const ACK_EVENT: &str = "acknowledgechallenge.onRequestChallenge";
    const PIN_EVENT: &str = "pinchallenge.onRequestChallenge";

    // =============================================================================
    // TEST PROVIDERS
    // =============================================================================

    #[derive(Default)]
    struct ScriptedKeyboard {
        prompts: Mutex<Vec<String>>,
        invocations: AtomicUsize,
    }

    #[async_trait]
    impl KeyboardInput for ScriptedKeyboard {
        async fn standard(&self, _request: KeyboardRequest) -> FireboltResult<String> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            Err(FireboltError::General)
        }

        async fn password(&self, request: KeyboardRequest) -> FireboltResult<String> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().push(request.message);
            Ok("hunter2".to_string())
        }

        async fn email(&self, request: KeyboardRequest) -> FireboltResult<String> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().push(request.message);
            Ok("user@example.com".to_string())
        }
    }

    struct CorrectPin;

    #[async_trait]
    impl PinChallengeProvider for CorrectPin {
        async fn challenge(&self, _request: PinChallenge) -> FireboltResult<PinChallengeResult> {
            Ok(PinChallengeResult {
                granted: Some(true),
                reason: ResultReason::CorrectPin,
            })
        }
    }

    /// Holds its answer until released
    struct WaitingUser {
        release: Arc<Notify>,
    }

    #[async_trait]
    impl AcknowledgeChallengeProvider for WaitingUser {
        async fn challenge(&self, _request: Challenge) -> FireboltResult<GrantResult> {
            self.release.notified().await;
            Ok(GrantResult {
                granted: Some(true),
            })
        }
    }

    fn challenge_params() -> Value {
        json!({
            "capability": "xrn:firebolt:capability:localization:postal-code",
            "requestor": {"id": "ReferenceApp", "name": "Firebolt Reference App"}
        })
    }

    async fn provide_keyboard(platform: &MockPlatform) -> Arc<ScriptedKeyboard> {
        let keyboard = Arc::new(ScriptedKeyboard::default());
        let register = tokio::spawn({
            let gateway = platform.gateway().clone();
            let keyboard = keyboard.clone();
            async move { keyboard::provide(&gateway, keyboard).await }
        });

        platform.ack_listen("keyboard.onRequestStandard", true).await;
        platform.ack_listen(PASSWORD_EVENT, true).await;
        platform.ack_listen("keyboard.onRequestEmail", true).await;
        register.await.unwrap().unwrap();
        keyboard
    }

    // =============================================================================
    // KEYBOARD
    // =============================================================================

    #[tokio::test]
    async fn test_keyboard_provider_answers_with_platform_id() {
        let platform = MockPlatform::start();
        let keyboard = provide_keyboard(&platform).await;

        platform
            .call_provider("k-1", PASSWORD_EVENT, json!({"message": "Enter password"}))
            .await;

        let reply = platform.next_frame().await;
        assert_eq!(
            reply,
            json!({"jsonrpc": "2.0", "id": "k-1", "result": "hunter2"})
        );
        assert_eq!(*keyboard.prompts.lock(), vec!["Enter password".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_params_rejected_before_handler() {
        let platform = MockPlatform::start();
        let keyboard = provide_keyboard(&platform).await;

        platform
            .call_provider("k-2", "keyboard.onRequestEmail", json!({"wrong": 1}))
            .await;

        let reply = platform.next_frame().await;
        assert_eq!(reply["id"], "k-2");
        assert_eq!(reply["error"]["code"], -32602);
        assert!(reply.get("result").is_none());
        assert_eq!(keyboard.invocations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handler_error_becomes_error_reply() {
        let platform = MockPlatform::start();
        provide_keyboard(&platform).await;

        platform
            .call_provider("k-3", "keyboard.onRequestStandard", json!({"message": "Name"}))
            .await;

        let reply = platform.next_frame().await;
        assert_eq!(reply["id"], "k-3");
        assert_eq!(reply["error"]["code"], 1);
    }

    #[tokio::test]
    async fn test_unknown_capability_gets_method_not_found() {
        let platform = MockPlatform::start();
        provide_keyboard(&platform).await;

        platform
            .call_provider("x-1", "keyboard.onRequestNothing", json!({}))
            .await;

        let reply = platform.next_frame().await;
        assert_eq!(reply["id"], "x-1");
        assert_eq!(reply["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_keyboard_rejection_rolls_back_earlier_registrations() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();

        let register = tokio::spawn({
            let gateway = gateway.clone();
            async move { keyboard::provide(&gateway, Arc::new(ScriptedKeyboard::default())).await }
        });

        platform.ack_listen("keyboard.onRequestStandard", true).await;
        let request = platform.expect_request(PASSWORD_EVENT).await;
        platform.reply_error(&request, -40300, "not permitted").await;
        platform.ack_listen("keyboard.onRequestStandard", false).await;

        assert_eq!(
            register.await.unwrap(),
            Err(FireboltError::CapabilityNotPermitted)
        );
        for event in [
            "keyboard.onRequestStandard",
            PASSWORD_EVENT,
            "keyboard.onRequestEmail",
        ] {
            assert!(!gateway.providers().is_provided(event), "{event} left behind");
        }
        platform.assert_quiet(std::time::Duration::from_millis(100)).await;
    }

    // =============================================================================
    // CHALLENGES
    // =============================================================================

    #[tokio::test]
    async fn test_pin_challenge_reply_shape() {
        let platform = MockPlatform::start();
        let register = tokio::spawn({
            let gateway = platform.gateway().clone();
            async move { pin_challenge::provide(&gateway, Arc::new(CorrectPin)).await }
        });
        platform.ack_listen(PIN_EVENT, true).await;
        register.await.unwrap().unwrap();

        platform
            .call_provider(
                "p-1",
                PIN_EVENT,
                json!({
                    "requestor": {"id": "ReferenceApp", "name": "Firebolt Reference App"},
                    "pinSpace": "purchase"
                }),
            )
            .await;

        let reply = platform.next_frame().await;
        assert_eq!(reply["id"], "p-1");
        assert_eq!(reply["result"], json!({"granted": true, "reason": "correctPin"}));
    }

    #[tokio::test]
    async fn test_waiting_provider_does_not_block_calls() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();
        let release = Arc::new(Notify::new());

        let register = tokio::spawn({
            let gateway = gateway.clone();
            let provider = Arc::new(WaitingUser {
                release: release.clone(),
            });
            async move { acknowledge_challenge::provide(&gateway, provider).await }
        });
        platform.ack_listen(ACK_EVENT, true).await;
        register.await.unwrap().unwrap();

        platform
            .call_provider("a-1", ACK_EVENT, challenge_params())
            .await;

        // Ordinary traffic flows while the user is still deciding
        let call = tokio::spawn({
            let gateway = gateway.clone();
            async move { gateway.call("device.id", json!({})).await }
        });
        let request = platform.expect_request("device.id").await;
        platform.reply(&request, json!("123")).await;
        assert_eq!(call.await.unwrap(), Ok(json!("123")));

        release.notify_one();
        let reply = platform.next_frame().await;
        assert_eq!(reply["id"], "a-1");
        assert_eq!(reply["result"], json!({"granted": true}));
    }

    // =============================================================================
    // REGISTRATION LIFECYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_reregistration_replaces_handler_without_request() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();

        let first = tokio::spawn({
            let gateway = gateway.clone();
            async move {
                acknowledge_challenge::ON_REQUEST_CHALLENGE
                    .provide(&gateway, |_: Challenge| async {
                        Ok(GrantResult { granted: Some(false) })
                    })
                    .await
            }
        });
        platform.ack_listen(ACK_EVENT, true).await;
        assert_eq!(first.await.unwrap(), Ok(Registration::Registered));

        let second = acknowledge_challenge::ON_REQUEST_CHALLENGE
            .provide(&gateway, |_: Challenge| async {
                Ok(GrantResult { granted: None })
            })
            .await;
        assert_eq!(second, Ok(Registration::Replaced));

        platform
            .call_provider("a-2", ACK_EVENT, challenge_params())
            .await;
        let reply = platform.next_frame().await;
        assert_eq!(reply["id"], "a-2");
        assert_eq!(reply["result"], json!({"granted": null}));
    }

    #[tokio::test]
    async fn test_pending_registration_does_not_block_other_capabilities() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();

        let stalled = tokio::spawn({
            let gateway = gateway.clone();
            async move { pin_challenge::provide(&gateway, Arc::new(CorrectPin)).await }
        });
        // Left unanswered for the rest of the test
        platform.expect_request(PIN_EVENT).await;

        let release = Arc::new(Notify::new());
        let other = tokio::spawn({
            let gateway = gateway.clone();
            let provider = Arc::new(WaitingUser { release });
            async move { acknowledge_challenge::provide(&gateway, provider).await }
        });
        platform.ack_listen(ACK_EVENT, true).await;

        let registered = tokio::time::timeout(std::time::Duration::from_secs(2), other)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(registered, Ok(()));
        assert!(gateway.providers().is_provided(ACK_EVENT));
        assert!(!stalled.is_finished());
    }

    #[tokio::test]
    async fn test_rejected_registration_is_not_kept() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();

        let register = tokio::spawn({
            let gateway = gateway.clone();
            async move { pin_challenge::provide(&gateway, Arc::new(CorrectPin)).await }
        });
        let request = platform.expect_request(PIN_EVENT).await;
        platform.reply_error(&request, -50300, "not available").await;

        assert_eq!(
            register.await.unwrap(),
            Err(FireboltError::CapabilityNotAvailable)
        );
        assert!(!gateway.providers().is_provided(PIN_EVENT));
    }

    #[tokio::test]
    async fn test_revoked_capability_is_no_longer_answered() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();

        let register = tokio::spawn({
            let gateway = gateway.clone();
            async move { pin_challenge::provide(&gateway, Arc::new(CorrectPin)).await }
        });
        platform.ack_listen(PIN_EVENT, true).await;
        register.await.unwrap().unwrap();

        let revoke = tokio::spawn({
            let gateway = gateway.clone();
            async move { pin_challenge::ON_REQUEST_CHALLENGE.revoke(&gateway).await }
        });
        platform.ack_listen(PIN_EVENT, false).await;
        assert_eq!(revoke.await.unwrap(), Ok(true));

        platform
            .call_provider(
                "p-2",
                PIN_EVENT,
                json!({
                    "requestor": {"id": "ReferenceApp", "name": "Firebolt Reference App"},
                    "pinSpace": PinSpace::Content
                }),
            )
            .await;
        let reply = platform.next_frame().await;
        assert_eq!(reply["error"]["code"], -32601);
    }
}
