//! Response bodies and request factories
//!
//! Bodies follow the Auth API v2 documentation examples.

use duo_authapi::{AuthenticationRequestParams, Credential, Factor};
use serde_json::{Value, json};

pub const INTEGRATION_KEY: &str = "DIWJ8X6AEYOR5OMC6TQ1";
pub const SECRET_KEY: &str = "Zh5eGmUq9zpfQnyUIu5OL9iWoMMv5ZNmk3zLJ4Ep";
pub const API_HOST: &str = "api-xxxxxxxx.duosecurity.com";
pub const ENROLL_PORTAL_URL: &str = "https://api-xxxxxxxx.duosecurity.com/portal?code=48bac5d9393fb2c2&akey=DAKXXXXXXXXXXXXXXXXX";

pub fn credential() -> Credential {
    Credential::new(INTEGRATION_KEY, SECRET_KEY, API_HOST)
}

pub fn alice_auto() -> AuthenticationRequestParams {
    AuthenticationRequestParams::with_auto_device("alice", Factor::Auto).unwrap()
}

pub fn alice_push() -> AuthenticationRequestParams {
    AuthenticationRequestParams::with_auto_device("alice", Factor::Push).unwrap()
}

pub fn alice_passcode(passcode: &str) -> AuthenticationRequestParams {
    AuthenticationRequestParams::new("alice", Factor::Passcode, None, Some(passcode.to_string()))
        .unwrap()
}

pub fn ok(response: Value) -> Value {
    json!({ "stat": "OK", "response": response })
}

pub fn preauth_allow() -> Value {
    ok(json!({ "result": "allow", "status_msg": "Allowing unknown user" }))
}

pub fn preauth_auth() -> Value {
    ok(json!({
        "result": "auth",
        "status_msg": "Account is active",
        "devices": [{
            "device": "DPFZRS9FB0D46QFTM891",
            "type": "phone",
            "number": "XXX-XXX-0100",
            "name": "",
            "capabilities": ["auto", "push", "sms", "phone", "mobile_otp"]
        }]
    }))
}

pub fn preauth_deny(message: &str) -> Value {
    ok(json!({ "result": "deny", "status_msg": message }))
}

pub fn preauth_enroll() -> Value {
    ok(json!({
        "result": "enroll",
        "status_msg": "Enroll an authentication device to proceed",
        "enroll_portal_url": ENROLL_PORTAL_URL
    }))
}

pub fn auth_allow() -> Value {
    ok(json!({
        "result": "allow",
        "status": "allow",
        "status_msg": "Success. Logging you in..."
    }))
}

pub fn auth_bypass() -> Value {
    ok(json!({
        "result": "allow",
        "status": "bypass",
        "status_msg": "Allowing unknown user"
    }))
}

pub fn auth_deny() -> Value {
    ok(json!({
        "result": "deny",
        "status": "deny",
        "status_msg": "Login request denied."
    }))
}

pub fn failure(code: u32, message: &str, detail: &str) -> Value {
    json!({
        "stat": "FAIL",
        "code": code,
        "message": message,
        "message_detail": detail
    })
}
