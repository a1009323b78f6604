//! Friendly display phrases for `statusLog` progress messages.

/// Fixed mapping from gateway status phrases to user-facing phrases.
///
/// These track the phrases the gateway actually emits; anything not listed
/// passes through as `None` and callers fall back to the raw message.
const STATUS_PHRASES: &[(&str, &str)] = &[
    ("Analyzing the prompt...", "We're carefully reviewing your request."),
    (
        "Re-analyzing the prompt...",
        "Checking again to ensure everything is accurate!",
    ),
    (
        "Analysis failed",
        "We couldn't process your request. Please try again with more details.",
    ),
    (
        "Execution plan created",
        "We've mapped out the next steps for you.",
    ),
    (
        "Retrieved the agents",
        "We've found the right tools to assist you.",
    ),
    ("Executing the agents...", "Processing your request now..."),
    (
        "Agents execution completed",
        "All done! Here's what we found for you.",
    ),
    (
        "Agents execution failed",
        "We ran into an issue while working on your request. Please try again.",
    ),
    (
        "Execution log created",
        "Your request details have been recorded for reference.",
    ),
    (
        "Fulfilling the prompt...",
        "Almost there! We're putting everything together.",
    ),
    (
        "Fulfillment completed",
        "Success! Your request has been completed.",
    ),
    (
        "Fulfillment failed",
        "We hit a snag while finishing up. Please try again or reach out for help.",
    ),
];

/// Look up the friendly phrase for a raw gateway status message.
pub fn friendly_message(raw: &str) -> Option<&'static str> {
    STATUS_PHRASES
        .iter()
        .find(|(phrase, _)| *phrase == raw)
        .map(|(_, friendly)| *friendly)
}
