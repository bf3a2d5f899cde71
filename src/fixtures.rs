//! Seed data for the mock workbench
//!
//! Four history entries with their versions and test case sets. Timestamps
//! are fixed so seeded state is reproducible.

use crate::model::{Message, Priority, Sender, Task, TestCase, Version};
use chrono::{DateTime, TimeZone, Utc};

/// Welcome line appended to every seeded task
pub const WELCOME_MESSAGE: &str =
    "Test cases are ready. Ask me to add, remove or update cases, or to change priorities.";

/// A seeded task together with its version history and case sets
#[derive(Debug, Clone)]
pub struct SeededTask {
    pub task: Task,
    /// Versions in append order, each with its case set
    pub versions: Vec<(Version, Vec<TestCase>)>,
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn case(
    id: &str,
    title: &str,
    preconditions: &[&str],
    steps: &[&str],
    expected_results: &[&str],
    scenario: &str,
    priority: Priority,
) -> TestCase {
    TestCase {
        id: id.to_string(),
        title: title.to_string(),
        preconditions: lines(preconditions),
        steps: lines(steps),
        expected_results: lines(expected_results),
        scenario: scenario.to_string(),
        priority,
    }
}

fn version(id: &str, name: &str, changes: &str, timestamp: DateTime<Utc>) -> Version {
    Version {
        id: id.to_string(),
        name: name.to_string(),
        timestamp,
        changes: changes.to_string(),
    }
}

fn seeded_task(
    id: &str,
    title: &str,
    date: &str,
    created: DateTime<Utc>,
    versions: Vec<(Version, Vec<TestCase>)>,
) -> SeededTask {
    let mut task = Task::new(id, title, date);
    task.case_count = versions.last().map(|(_, cases)| cases.len()).unwrap_or(0);
    let mut welcome = Message::new(WELCOME_MESSAGE, Sender::Ai);
    welcome.timestamp = created;
    task.messages.push(welcome);
    SeededTask { task, versions }
}

fn login_case(id: &str) -> TestCase {
    case(
        id,
        "Verify User Login with Valid Credentials",
        &[
            "User has registered an account",
            "User has a valid username and password",
        ],
        &[
            "Navigate to the login page",
            "Enter valid username",
            "Enter valid password",
            "Click on login button",
        ],
        &[
            "User should be logged in successfully",
            "User should be redirected to the dashboard",
            "Welcome message should be displayed",
        ],
        "Authentication",
        Priority::High,
    )
}

fn password_reset_case(id: &str) -> TestCase {
    case(
        id,
        "Check Password Reset Functionality",
        &["User has registered an account"],
        &[
            "Navigate to the login page",
            "Click on 'Forgot Password' link",
            "Enter registered email",
            "Submit the form",
            "Check email for reset link",
            "Click on the reset link",
            "Enter new password",
            "Confirm new password",
            "Submit the form",
        ],
        &[
            "Password reset email should be sent",
            "User should be able to reset password",
            "User should be able to login with new password",
        ],
        "Authentication",
        Priority::Medium,
    )
}

fn registration_case(id: &str) -> TestCase {
    case(
        id,
        "Validate User Registration Form",
        &["Registration page is accessible"],
        &[
            "Navigate to registration page",
            "Enter invalid email format",
            "Enter password less than 8 characters",
            "Submit the form",
        ],
        &[
            "Form submission should fail",
            "Error message for invalid email should be displayed",
            "Error message for password length should be displayed",
        ],
        "Registration",
        Priority::Medium,
    )
}

fn card_payment_case(id: &str) -> TestCase {
    case(
        id,
        "Verify Credit Card Payment",
        &["User is logged in", "User has items in cart"],
        &[
            "Navigate to checkout page",
            "Select credit card payment method",
            "Enter valid credit card details",
            "Submit payment",
        ],
        &[
            "Payment should be processed successfully",
            "Order confirmation page should be displayed",
            "Confirmation email should be sent to the user",
        ],
        "Payment",
        Priority::High,
    )
}

fn payment_failure_case(id: &str) -> TestCase {
    case(
        id,
        "Handle Payment Failure",
        &["User is logged in", "User has items in cart"],
        &[
            "Navigate to checkout page",
            "Select credit card payment method",
            "Enter invalid credit card details",
            "Submit payment",
        ],
        &[
            "Payment should fail",
            "Error message should be displayed",
            "User should be able to retry payment",
        ],
        "Payment",
        Priority::High,
    )
}

fn dashboard_case(id: &str) -> TestCase {
    case(
        id,
        "Verify Dashboard Metrics Refresh",
        &["User is logged in", "Analytics data exists for the last 30 days"],
        &[
            "Open the dashboard",
            "Select the 'Last 7 days' range",
            "Click on 'Refresh'",
        ],
        &[
            "Charts should reload with the selected range",
            "Totals should match the underlying report",
        ],
        "Analytics",
        Priority::Medium,
    )
}

fn profile_update_case(id: &str) -> TestCase {
    case(
        id,
        "Verify Profile Information Update",
        &["User is logged in", "User is on the profile page"],
        &[
            "Click on 'Edit Profile' button",
            "Update name, email, and bio",
            "Click on 'Save Changes' button",
        ],
        &[
            "Profile should be updated successfully",
            "Success message should be displayed",
            "Updated information should be visible on the profile page",
        ],
        "Profile Management",
        Priority::Medium,
    )
}

fn logout_case(id: &str) -> TestCase {
    case(
        id,
        "Test User Logout Functionality",
        &["User is logged in"],
        &[
            "Click on the user avatar",
            "Select 'Logout' option from the dropdown",
        ],
        &[
            "User should be logged out",
            "User should be redirected to the login page",
            "Session should be invalidated",
        ],
        "Authentication",
        Priority::Low,
    )
}

/// The seeded history, in display order
pub fn seeded_tasks() -> Vec<SeededTask> {
    vec![
        seeded_task(
            "1",
            "User Authentication Flow",
            "2023-09-15",
            at(2023, 9, 15, 9),
            vec![
                (
                    version(
                        "1-v1",
                        "Initial version",
                        "Generated from PRD input",
                        at(2023, 9, 15, 9),
                    ),
                    vec![login_case("1-tc1"), password_reset_case("1-tc2")],
                ),
                (
                    version(
                        "1-v2",
                        "Added registration coverage",
                        "Added registration form validation case",
                        at(2023, 9, 15, 11),
                    ),
                    vec![
                        login_case("1-tc1"),
                        password_reset_case("1-tc2"),
                        registration_case("1-tc3"),
                    ],
                ),
            ],
        ),
        seeded_task(
            "2",
            "Payment Processing Module",
            "2023-09-10",
            at(2023, 9, 10, 9),
            vec![
                (
                    version(
                        "2-v1",
                        "Initial version",
                        "Generated from PRD input",
                        at(2023, 9, 10, 9),
                    ),
                    vec![card_payment_case("2-tc1")],
                ),
                (
                    version(
                        "2-v2",
                        "Added failure handling",
                        "Added payment failure case",
                        at(2023, 9, 10, 14),
                    ),
                    vec![card_payment_case("2-tc1"), payment_failure_case("2-tc2")],
                ),
            ],
        ),
        seeded_task(
            "3",
            "Dashboard Analytics",
            "2023-09-05",
            at(2023, 9, 5, 9),
            vec![(
                version(
                    "3-v1",
                    "Initial version",
                    "Generated from PRD input",
                    at(2023, 9, 5, 9),
                ),
                vec![dashboard_case("3-tc1")],
            )],
        ),
        seeded_task(
            "4",
            "Profile Management",
            "2023-09-01",
            at(2023, 9, 1, 9),
            vec![(
                version(
                    "4-v1",
                    "Initial version",
                    "Generated from PRD input",
                    at(2023, 9, 1, 9),
                ),
                vec![profile_update_case("4-tc1"), logout_case("4-tc2")],
            )],
        ),
    ]
}

/// Templates the mock generator hands out for a fresh generation
pub fn generation_templates() -> Vec<TestCase> {
    vec![
        login_case("tc1"),
        password_reset_case("tc2"),
        registration_case("tc3"),
    ]
}
