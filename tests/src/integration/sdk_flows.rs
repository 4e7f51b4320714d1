//! # SDK Flows
//!
//! Module descriptors driven against the scripted platform: request shapes,
//! payload decoding and per-method deadlines.

#[cfg(test)]
mod tests {
    use crate::harness::{recv_within, MockPlatform};
    use firebolt_sdk::localization::{AdditionalInfoEntry, LATLON, LOCALE};
    use firebolt_sdk::metrics::{PageParams, PAGE, READY};
    use firebolt_sdk::user_grants::{self, GrantRequest, GrantState, Permission, Role};
    use firebolt_sdk::{device, is_method_supported, FireboltError, GatewayConfig};
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::mpsc;

    const WAIT: Duration = Duration::from_secs(2);

    // =============================================================================
    // PROPERTIES
    // =============================================================================

    #[tokio::test]
    async fn test_locale_get_request_shape() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();

        let get = tokio::spawn(async move { LOCALE.get(&gateway).await });

        let request = platform.expect_request("localization.locale").await;
        assert_eq!(request["jsonrpc"], "2.0");
        assert_eq!(request["params"], json!({}));
        assert!(request["id"].is_u64());

        platform.reply(&request, json!("en-US")).await;
        assert_eq!(get.await.unwrap(), Ok("en-US".to_string()));
    }

    #[tokio::test]
    async fn test_device_name_set_wraps_value() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();

        let set = tokio::spawn(async move { device::NAME.set(&gateway, &"Den".to_string()).await });

        let request = platform.expect_request("device.setName").await;
        assert_eq!(request["params"], json!({"value": "Den"}));

        platform.reply(&request, json!(null)).await;
        assert_eq!(set.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_latlon_decodes_from_pair() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();

        let get = tokio::spawn(async move { LATLON.get(&gateway).await });

        let request = platform.expect_request("localization.latlon").await;
        platform.reply(&request, json!([39.9549, -75.1699])).await;
        assert_eq!(get.await.unwrap(), Ok((39.9549, -75.1699)));
    }

    #[tokio::test]
    async fn test_wrong_result_type_is_general_error() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();

        let get = tokio::spawn(async move { LOCALE.get(&gateway).await });

        let request = platform.expect_request("localization.locale").await;
        platform.reply(&request, json!({"not": "a string"})).await;
        assert_eq!(get.await.unwrap(), Err(FireboltError::General));
    }

    // =============================================================================
    // METHODS
    // =============================================================================

    #[tokio::test]
    async fn test_metrics_ready_and_page() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();

        let ready = tokio::spawn({
            let gateway = gateway.clone();
            async move { READY.call(&gateway, &()).await }
        });
        let request = platform.expect_request("metrics.ready").await;
        assert_eq!(request["params"], json!({}));
        platform.reply(&request, json!(true)).await;
        assert_eq!(ready.await.unwrap(), Ok(true));

        let page = tokio::spawn({
            let gateway = gateway.clone();
            async move {
                PAGE.call(
                    &gateway,
                    &PageParams {
                        page_id: "home".to_string(),
                    },
                )
                .await
            }
        });
        let request = platform.expect_request("metrics.page").await;
        assert_eq!(request["params"], json!({"pageId": "home"}));
        platform.reply(&request, json!(true)).await;
        assert_eq!(page.await.unwrap(), Ok(true));
    }

    #[tokio::test]
    async fn test_unit_result_method() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();

        let add = tokio::spawn(async move {
            firebolt_sdk::localization::ADD_ADDITIONAL_INFO
                .call(
                    &gateway,
                    &AdditionalInfoEntry {
                        key: "region".to_string(),
                        value: "north".to_string(),
                    },
                )
                .await
        });

        let request = platform
            .expect_request("localization.addAdditionalInfo")
            .await;
        assert_eq!(request["params"], json!({"key": "region", "value": "north"}));
        platform.reply(&request, json!(null)).await;
        assert_eq!(add.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_grant_request_outlives_default_deadline() {
        let config = GatewayConfig {
            wait_time: Duration::from_millis(50),
            ..GatewayConfig::default()
        };
        let platform = MockPlatform::with_config(config);
        let gateway = platform.gateway().clone();

        let request_grants = tokio::spawn(async move {
            user_grants::REQUEST
                .call(
                    &gateway,
                    &GrantRequest {
                        app_id: "certapp".to_string(),
                        permissions: vec![Permission {
                            role: Some(Role::Use),
                            capability: "xrn:firebolt:capability:localization:postal-code"
                                .to_string(),
                        }],
                        options: None,
                    },
                )
                .await
        });

        let request = platform.expect_request("usergrants.request").await;
        tokio::time::sleep(Duration::from_millis(150)).await;
        platform
            .reply(
                &request,
                json!([{
                    "state": "granted",
                    "capability": "xrn:firebolt:capability:localization:postal-code",
                    "role": "use",
                    "lifespan": "once"
                }]),
            )
            .await;

        let grants = request_grants.await.unwrap().unwrap();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].state, GrantState::Granted);
    }

    // =============================================================================
    // EVENTS
    // =============================================================================

    #[tokio::test]
    async fn test_device_name_changed_notification() {
        let platform = MockPlatform::start();
        let gateway = platform.gateway().clone();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let subscribe = tokio::spawn({
            let gateway = gateway.clone();
            async move {
                device::ON_DEVICE_NAME_CHANGED
                    .subscribe(&gateway, move |name: String| {
                        let _ = tx.send(name);
                    })
                    .await
            }
        });
        platform
            .ack_listen("device.onDeviceNameChanged", true)
            .await;
        subscribe.await.unwrap().unwrap();

        platform
            .notify("device.onDeviceNameChanged", json!("Kitchen"))
            .await;
        assert_eq!(recv_within(&mut rx, WAIT).await, "Kitchen");

        // Undecodable payloads are skipped
        platform
            .emit("device.onDeviceNameChanged", json!(42))
            .await;
        platform
            .emit("device.onDeviceNameChanged", json!("Office"))
            .await;
        assert_eq!(recv_within(&mut rx, WAIT).await, "Office");
    }

    // =============================================================================
    // REGISTRY
    // =============================================================================

    #[test]
    fn test_exercised_methods_are_registered() {
        for method in [
            "localization.locale",
            "localization.latlon",
            "localization.addAdditionalInfo",
            "localization.onLocaleChanged",
            "device.name",
            "device.setName",
            "device.onDeviceNameChanged",
            "metrics.ready",
            "metrics.page",
            "usergrants.request",
            "keyboard.onRequestPassword",
            "pinchallenge.onRequestChallenge",
            "acknowledgechallenge.onRequestChallenge",
        ] {
            assert!(is_method_supported(method), "{method} not registered");
        }
        assert!(!is_method_supported("device.setModel"));
    }
}
