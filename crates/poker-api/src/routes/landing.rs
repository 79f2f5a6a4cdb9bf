pub const WELCOME: &str = "Welcome to the API";

pub async fn landing() -> &'static str {
    WELCOME
}
