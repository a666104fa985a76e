//! One user record rendered as a terminal card.

use chrono::{DateTime, Utc};
use user_admin_core::User;

/// Render a card. `busy` replaces the action row with a deleting
/// indicator for the duration of the card's own delete call.
pub fn render_card(user: &User, busy: bool) -> String {
    let mut lines = vec![
        format!("┌ {}", user.name),
        format!("│ {}  <{}>", user.id, user.email),
    ];
    if let Some(age) = user.age {
        lines.push(format!("│ Age: {age}"));
    }
    lines.push(format!("│ Created: {}", format_date(user.created_at.as_ref())));
    if user.updated_at.is_some() && user.updated_at != user.created_at {
        lines.push(format!(
            "│ Updated: {}",
            format_date(user.updated_at.as_ref())
        ));
    }
    if busy {
        lines.push("└ Deleting…".to_string());
    } else {
        lines.push("└ edit <id> · delete <id>".to_string());
    }
    lines.join("\n")
}

fn format_date(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => "N/A".to_string(),
    }
}
