//! Simulated chat assistant
//!
//! The workbench never calls a real model. [`CannedAssistant`] routes a
//! request to one of a handful of fixed replies by keyword and decides
//! whether the request asks for the test case set to change.

use regex::Regex;

/// Produces replies to chat requests
pub trait Assistant: Send + Sync {
    /// Reply text for a user request
    fn reply(&self, request: &str) -> String;

    /// True if the request asks for the test case set to be modified
    fn requests_change(&self, request: &str) -> bool;
}

const ADDED_REPLY: &str =
    "I've added new test cases based on your request. You can see them in the test case panel.";
const REMOVED_REPLY: &str = "I've removed the specified test cases from the list. Is there anything else you'd like me to modify?";
const UPDATED_REPLY: &str = "I've updated the test cases according to your specifications. The changes are now reflected in the test case panel.";
const PRIORITY_REPLY: &str = "I've adjusted the priority levels for the test cases you mentioned. You can filter by priority to see the changes.";
const GENERIC_REPLY: &str = "I understand your request. I'll analyze and process it to modify the test cases accordingly. Is there anything specific you'd like me to focus on?";

/// Keyword-routed assistant with fixed replies
#[derive(Debug, Clone)]
pub struct CannedAssistant {
    change_pattern: Regex,
}

impl CannedAssistant {
    /// Creates the assistant
    ///
    /// # Examples
    ///
    /// ```
    /// use casebench::assistant::{Assistant, CannedAssistant};
    ///
    /// let assistant = CannedAssistant::new();
    /// assert!(assistant.requests_change("Please add a test for logout"));
    /// assert!(!assistant.requests_change("What does this cover?"));
    /// ```
    pub fn new() -> Self {
        Self {
            change_pattern: Regex::new(r"(?i)add|delete|remove|modify|update|change|priority")
                .expect("change pattern is a valid regex"),
        }
    }
}

impl Default for CannedAssistant {
    fn default() -> Self {
        Self::new()
    }
}

impl Assistant for CannedAssistant {
    fn reply(&self, request: &str) -> String {
        let input = request.to_lowercase();

        let reply = if input.contains("add") && (input.contains("test") || input.contains("case"))
        {
            ADDED_REPLY
        } else if input.contains("delete") || input.contains("remove") {
            REMOVED_REPLY
        } else if input.contains("modify") || input.contains("update") || input.contains("change")
        {
            UPDATED_REPLY
        } else if input.contains("priority") {
            PRIORITY_REPLY
        } else {
            GENERIC_REPLY
        };
        reply.to_string()
    }

    fn requests_change(&self, request: &str) -> bool {
        self.change_pattern.is_match(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_routing() {
        let assistant = CannedAssistant::new();
        assert_eq!(assistant.reply("Add a test for SSO"), ADDED_REPLY);
        assert_eq!(assistant.reply("Remove the duplicate case"), REMOVED_REPLY);
        assert_eq!(assistant.reply("Please UPDATE step 3"), UPDATED_REPLY);
        assert_eq!(assistant.reply("Raise the priority of tc2"), PRIORITY_REPLY);
        assert_eq!(assistant.reply("Looks good"), GENERIC_REPLY);
    }

    #[test]
    fn test_add_without_test_or_case_falls_through() {
        let assistant = CannedAssistant::new();
        // "add" alone does not pick the added reply, "change" does apply
        assert_eq!(assistant.reply("add and change steps"), UPDATED_REPLY);
    }

    #[test]
    fn test_requests_change_is_case_insensitive() {
        let assistant = CannedAssistant::new();
        assert!(assistant.requests_change("DELETE case 3"));
        assert!(assistant.requests_change("bump Priority"));
        assert!(!assistant.requests_change("Thanks!"));
    }
}
