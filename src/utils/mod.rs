use axum::Json;
use serde::{Deserialize, Serialize};

/// 通用的API响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 错误码，0表示成功，非0表示失败
    pub code: i32,
    /// 错误消息，成功时为"success"
    pub msg: String,
    /// 响应数据，错误时为None
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resp_data: Option<T>,
}

pub fn success_to_api_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code: error_codes::SUCCESS,
        msg: "success".into(),
        resp_data: Some(data),
    })
}

pub fn error_to_api_response<T>(code: i32, msg: String) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code,
        msg,
        resp_data: None,
    })
}

pub mod error_codes {
    pub const SUCCESS: i32 = 0;
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const RATE_LIMIT: i32 = 1005;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

/// 当前墙钟时间，毫秒
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_carries_data() {
        let Json(resp) = success_to_api_response(serde_json::json!({ "status": "completed" }));
        assert_eq!(resp.code, error_codes::SUCCESS);
        assert_eq!(resp.msg, "success");

        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(body["resp_data"]["status"], "completed");
    }

    #[test]
    fn error_envelope_omits_resp_data() {
        let Json(resp) =
            error_to_api_response::<()>(error_codes::RATE_LIMIT, "Rate limit exceeded".into());

        let body = serde_json::to_value(&resp).unwrap();
        assert_eq!(body["code"], error_codes::RATE_LIMIT);
        assert!(body.get("resp_data").is_none());
    }

    #[test]
    fn now_millis_is_epoch_scaled() {
        // 2020-01-01 之后、3000 年之前
        let now = now_millis();
        assert!(now > 1_577_836_800_000);
        assert!(now < 32_503_680_000_000);
    }
}
