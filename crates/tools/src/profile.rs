//! User profile tools — who the model is talking to.

use ragent_core::tool::FunctionTool;
use tracing::info;

pub const USER_NAME: &str = "Carlos Estefano Garcia";
pub const USER_AGE: &str = "42";

/// `GetMyName`: the proper name of the current user.
pub fn get_my_name() -> FunctionTool {
    FunctionTool::returning(
        "GetMyName",
        "Retrieve the proper name of the user you are talking to",
        || {
            info!(tool = "GetMyName", "Calling tool");
            USER_NAME.to_string()
        },
    )
}

/// `GetMyAge`: the age of the current user.
pub fn get_my_age() -> FunctionTool {
    FunctionTool::returning(
        "GetMyAge",
        "Retrieve the age of the user you are talking to",
        || {
            info!(tool = "GetMyAge", "Calling tool");
            USER_AGE.to_string()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragent_core::tool::Tool;

    #[tokio::test]
    async fn profile_tools_return_fixed_values() {
        let name = get_my_name().execute(serde_json::json!({})).await.unwrap();
        assert_eq!(name.output, "Carlos Estefano Garcia");

        let age = get_my_age().execute(serde_json::json!({})).await.unwrap();
        assert_eq!(age.output, "42");
    }

    #[test]
    fn profile_tools_take_no_arguments() {
        let def = get_my_name().to_definition();
        assert_eq!(def.name, "GetMyName");
        assert_eq!(def.parameters["properties"], serde_json::json!({}));
    }
}
