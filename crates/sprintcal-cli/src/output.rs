use serde::Serialize;
use sprintcal_core::Notice;

#[derive(Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    pub api_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

#[derive(Serialize)]
pub struct ListResponse<T: Serialize> {
    pub items: Vec<T>,
    pub count: usize,
}

fn emit<T: Serialize>(response: &CliResponse<T>, to_stderr: bool) {
    match serde_json::to_string(response) {
        Ok(json) if to_stderr => eprintln!("{}", json),
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("failed to encode response: {}", e),
    }
}

pub fn output_success<T: Serialize>(data: T, notices: Vec<Notice>) {
    let response = CliResponse {
        success: true,
        api_version: env!("CARGO_PKG_VERSION"),
        data: Some(data),
        error: None,
        notices,
    };
    emit(&response, false);
}

pub fn output_list<T: Serialize>(items: Vec<T>, notices: Vec<Notice>) {
    let count = items.len();
    let list = ListResponse { items, count };
    output_success(list, notices);
}

/// Notices for a command whose stdout is raw data rather than a response.
/// Written to stderr so the data stays parseable.
pub fn output_notices(notices: Vec<Notice>) {
    if notices.is_empty() {
        return;
    }
    let response: CliResponse<()> = CliResponse {
        success: true,
        api_version: env!("CARGO_PKG_VERSION"),
        data: None,
        error: None,
        notices,
    };
    emit(&response, true);
}

/// Prints an error response to stderr and exits with code 1.
pub fn output_error(message: &str, notices: Vec<Notice>) -> ! {
    let response: CliResponse<()> = CliResponse {
        success: false,
        api_version: env!("CARGO_PKG_VERSION"),
        data: None,
        error: Some(message.to_string()),
        notices,
    };
    emit(&response, true);
    std::process::exit(1);
}
