use serde::Serialize;

/// Uniform success envelope: `{success, message, data?}`.
///
/// Failure envelopes are produced by [`crate::utils::errors::AppError`]
/// so both shapes stay in one pair of places.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_with_data() {
        let body = ApiResponse::ok("Post created", json!({ "id": 1 }));
        let serialized = serde_json::to_value(&body).unwrap();
        assert_eq!(serialized["success"], true);
        assert_eq!(serialized["message"], "Post created");
        assert_eq!(serialized["data"]["id"], 1);
    }

    #[test]
    fn envelope_without_data_omits_field() {
        let body = ApiResponse::message("Deleted");
        let serialized = serde_json::to_string(&body).unwrap();
        assert!(!serialized.contains("data"));
    }
}
