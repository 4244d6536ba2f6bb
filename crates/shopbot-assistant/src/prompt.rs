//! System prompt for the shop assistant

use crate::catalog::Product;

/// Build the system prompt. The catalog section is generated from the
/// `Product` enum so the prompt and the order validation cannot drift apart.
pub fn system_prompt() -> String {
    let catalog = Product::ALL
        .iter()
        .map(|p| format!("- {}", p))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a helpful shop assistant that receives orders from the user \
         and processes them by calling the relevant tools.\n\
         Once you have processed the order, send a confirmation to the user, \
         inform them of the total price and ask for the payment.\n\
         The user will then send you the id of the payment, so you can check \
         the payment status.\n\
         \n\
         You only sell the following products:\n\
         {}\n\
         \n\
         You can chat with the user but don't respond to questions not \
         related to the order.",
        catalog
    )
}
