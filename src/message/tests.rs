use crate::{
    CallDescriptor, EnvelopeMode, EnvelopeViolation, Error, ErrorCode, ErrorKind, ErrorObject,
    NO_PARAMS, ParamValue, RequestId, RequestMessage, ResponseMessage,
};
use serde_json::{Value, json};

fn response(input: &str) -> ResponseMessage {
    serde_json::from_str(input).unwrap()
}

#[test]
fn request_message_serialize() -> anyhow::Result<()> {
    let call = CallDescriptor::new("http://localhost", "test_method", [1, 2]);
    let body = RequestMessage::new(RequestId(1), &call).to_vec()?;
    assert_eq!(
        String::from_utf8(body)?,
        r#"{"jsonrpc":"2.0","id":1,"method":"test_method","params":[1,2]}"#
    );
    Ok(())
}

#[test]
fn request_message_serialize_no_params() -> anyhow::Result<()> {
    let call = CallDescriptor::new("http://localhost", "test_method", NO_PARAMS);
    let body = RequestMessage::new(RequestId(7), &call).to_vec()?;
    let value: Value = serde_json::from_slice(&body)?;
    assert_eq!(value["params"], json!([]));
    assert_eq!(value["id"], json!(7));
    Ok(())
}

#[test]
fn request_message_round_trip() -> anyhow::Result<()> {
    let params = vec![
        ParamValue::from("0xd8da6bf26964af9d7eed9e03e53415d37aa96045"),
        ParamValue::from("latest"),
        ParamValue::from(json!({"b": [1, 2.5, null], "a": true})),
        ParamValue::Null,
        ParamValue::from(u64::MAX),
    ];
    let call = CallDescriptor::new("http://localhost", "eth_getBalance", params.clone());
    let body = RequestMessage::new(RequestId::now(), &call).to_vec()?;

    let value: Value = serde_json::from_slice(&body)?;
    assert_eq!(value["method"], "eth_getBalance");
    let parsed: Vec<ParamValue> = serde_json::from_value(value["params"].clone())?;
    assert_eq!(parsed, params);
    Ok(())
}

#[test]
fn request_id_is_seconds() {
    let id = RequestId::now();
    // 2020-01-01T00:00:00Z; a millisecond clock would be three orders of magnitude larger.
    assert!(id.0 > 1_577_836_800);
    assert!(id.0 < 100_000_000_000);
}

#[test]
fn response_message_result() -> anyhow::Result<()> {
    let m = response(r#"{"jsonrpc":"2.0","id":1,"result":{"result1":"value1"}}"#);
    let result = m.into_result()?;
    assert_eq!(
        serde_json::from_str::<Value>(result.get())?,
        json!({"result1": "value1"})
    );
    Ok(())
}

#[test]
fn response_message_result_null() -> anyhow::Result<()> {
    let m = response(r#"{"jsonrpc":"2.0","id":1,"result":null}"#);
    assert_eq!(m.into_result()?.get(), "null");
    Ok(())
}

#[test]
fn response_message_error() {
    let m = response(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"nope"}}"#);
    let e = m.into_result().unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Protocol);
    assert_eq!(
        e.error_object(),
        Some(&ErrorObject {
            code: Some(ErrorCode::METHOD_NOT_FOUND),
            message: "nope".to_string(),
            data: None,
        })
    );
    assert_eq!(e.to_string(), "nope");
}

#[test]
fn response_message_error_without_code() {
    let m = response(r#"{"error":{"message":"boom"}}"#);
    let e = m.into_result().unwrap_err();
    assert_eq!(e.error_object().and_then(|e| e.code), None);
    assert_eq!(e.message(), "boom");
}

#[test]
fn response_message_error_null_is_absent() -> anyhow::Result<()> {
    let m = response(r#"{"result":1,"error":null}"#);
    assert_eq!(m.into_result()?.get(), "1");
    Ok(())
}

#[test]
fn response_message_missing() {
    let m = response(r#"{"jsonrpc":"2.0","id":1}"#);
    let e = m.into_result().unwrap_err();
    assert!(matches!(e, Error::Envelope(EnvelopeViolation::Missing)), "{e:?}");
}

#[test]
fn response_message_malformed_error() {
    for input in [
        r#"{"error":"boom"}"#,
        r#"{"error":{"code":1}}"#,
        r#"{"error":{"code":"x","message":"boom"}}"#,
    ] {
        let e = response(input).into_result().unwrap_err();
        assert!(
            matches!(e, Error::Envelope(EnvelopeViolation::MalformedError)),
            "{input}: {e:?}"
        );
        assert_eq!(e.kind(), ErrorKind::Protocol);
    }
}

#[test]
fn response_message_ambiguous() {
    let m = response(r#"{"result":1,"error":{"message":"x"}}"#);
    let e = m.into_result().unwrap_err();
    assert!(matches!(e, Error::Envelope(EnvelopeViolation::Ambiguous)), "{e:?}");
    assert_eq!(e.kind(), ErrorKind::Protocol);
}

#[test]
fn response_message_version() {
    let m = response(r#"{"jsonrpc":"1.0","result":1}"#);
    let e = m.into_result().unwrap_err();
    assert!(matches!(&e, Error::Version(v) if v == "1.0"), "{e:?}");
}

#[test]
fn decode_jsonrpc() -> anyhow::Result<()> {
    let n: u64 = EnvelopeMode::JsonRpc.decode(br#"{"result": 42}"#)?;
    assert_eq!(n, 42);
    Ok(())
}

#[test]
fn decode_jsonrpc_result_type() {
    let e = EnvelopeMode::JsonRpc
        .decode::<u64>(br#"{"result": "42"}"#)
        .unwrap_err();
    assert!(matches!(e, Error::ResultType(_)), "{e:?}");
}

#[test]
fn decode_raw() -> anyhow::Result<()> {
    let v: Value = EnvelopeMode::Raw.decode(br#"{"error":{"message":"boom"}}"#)?;
    assert_eq!(v, json!({"error": {"message": "boom"}}));
    Ok(())
}

#[test]
fn decode_malformed() {
    for mode in [EnvelopeMode::Raw, EnvelopeMode::JsonRpc] {
        let e = mode.decode::<Value>(b"<html>").unwrap_err();
        assert!(matches!(e, Error::Parse(_)), "{mode}: {e:?}");
        assert_eq!(e.kind(), ErrorKind::Transport);
    }
}

#[test]
fn envelope_mode_parse() {
    assert_eq!("raw".parse::<EnvelopeMode>().ok(), Some(EnvelopeMode::Raw));
    assert_eq!("jsonrpc".parse::<EnvelopeMode>().ok(), Some(EnvelopeMode::JsonRpc));
    assert_eq!(EnvelopeMode::default().to_string(), "jsonrpc");
}

#[test]
fn error_code_message() {
    assert_eq!(ErrorCode::INTERNAL_ERROR.message(), "Internal error");
    assert_eq!(ErrorCode(-32050).message(), "Server error");
    assert_eq!(ErrorCode(1).message(), "Unknown error");
}

#[test]
fn param_value_equality() {
    let a = ParamValue::from(json!({"x": 1, "y": [0.5]}));
    let b = ParamValue::from(json!({"y": [0.5], "x": 1}));
    assert_eq!(a, b);
    assert_eq!(ParamValue::Float(f64::NAN), ParamValue::Float(f64::NAN));
    assert_ne!(ParamValue::from(1), ParamValue::from(1.0));
}

#[test]
fn param_value_unsigned_is_int() -> anyhow::Result<()> {
    assert_eq!(ParamValue::from(7u64), ParamValue::Int(7));
    assert_eq!(ParamValue::from(7u8), ParamValue::from(7i32));
    assert_eq!(ParamValue::from(u64::MAX), ParamValue::UInt(u64::MAX));

    for p in [
        ParamValue::from(7u32),
        ParamValue::from(i64::MAX as u64),
        ParamValue::from(u64::MAX),
    ] {
        let back: ParamValue = serde_json::from_str(&serde_json::to_string(&p)?)?;
        assert_eq!(back, p);
        assert_eq!(ParamValue::from(p.to_value()), p);
    }
    Ok(())
}
