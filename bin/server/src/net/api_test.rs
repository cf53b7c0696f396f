use super::*;

#[test]
fn endpoint_path_is_stable() {
    assert_eq!(WECHAT_AUTH_URL_ENDPOINT, "/oauth2/wechat/authurl");
}

#[test]
fn envelope_with_url_parses() {
    let body: AuthUrlResponse = serde_json::from_str(
        r#"{"code":0,"msg":"","data":"https://open.weixin.qq.com/connect/qrconnect?appid=wx1"}"#,
    )
    .expect("deserialize");

    assert_eq!(body.code, 0);
    assert_eq!(
        body.data.as_deref(),
        Some("https://open.weixin.qq.com/connect/qrconnect?appid=wx1")
    );
}

#[test]
fn envelope_with_null_data_has_no_url() {
    let body: AuthUrlResponse =
        serde_json::from_str(r#"{"code":0,"msg":"","data":null}"#).expect("deserialize");

    assert!(body.data.is_none());
}

#[test]
fn empty_envelope_has_no_url() {
    let body: AuthUrlResponse = serde_json::from_str("{}").expect("deserialize");

    assert_eq!(body.code, 0);
    assert!(body.msg.is_empty());
    assert!(body.data.is_none());
}

#[test]
fn failure_envelope_carries_code_and_msg() {
    let body: AuthUrlResponse =
        serde_json::from_str(r#"{"code":5,"msg":"system error","data":null}"#)
            .expect("deserialize");

    assert_eq!(body.code, 5);
    assert_eq!(body.msg, "system error");
    assert!(body.data.is_none());
}

#[test]
fn request_failed_message_formats_status() {
    assert_eq!(
        auth_url_request_failed_message(502),
        "auth url request failed: 502"
    );
}
