use crate::calc::CalcError;
use crate::server::api;
use crate::server::AppState;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

fn ok_json(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

pub fn route_request(state: &AppState, method: &str, path: &str, body: &str) -> HttpResponse {
    match (method, path) {
        ("GET", "/api/health") => match api::health_payload(state) {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        (method, path)
            if method == "GET"
                && (path == "/api/rooms" || path.starts_with("/api/rooms?")) =>
        {
            match api::rooms_payload(state, path) {
                Ok(payload) => ok_json(payload),
                Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
            }
        }
        ("POST", "/api/calc") => match api::calc_payload(state, body) {
            Ok(payload) => ok_json(payload),
            Err(api::CalcPayloadError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::CalcPayloadError::Calc(err @ CalcError::EmptyResult { .. })) => {
                error_response(500, "Internal Server Error", &err.to_string())
            }
            Err(api::CalcPayloadError::Calc(err)) => {
                error_response(400, "Bad Request", &err.to_string())
            }
            Err(api::CalcPayloadError::Serialize(err)) => {
                error_response(500, "Internal Server Error", &err.to_string())
            }
        },
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}
