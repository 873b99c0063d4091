//! Plain text rendering of a [`View`].

use std::fmt::Write as _;

use common::pagination::Info;
use roster::read::user::list::{Key, Order, View};

/// Columns of the rendered table along with their headers.
const COLUMNS: [(Key, &str); 5] = [
    (Key::Id, "ID"),
    (Key::FirstName, "First name"),
    (Key::LastName, "Last name"),
    (Key::Email, "Email"),
    (Key::Department, "Department"),
];

/// Renders the provided [`View`] as a table followed by its window summary.
///
/// The header of the sorted column is marked with its [`Order`], and the
/// summary lists the available navigation.
#[must_use]
pub fn table(view: &View) -> String {
    let header = COLUMNS
        .iter()
        .map(|&(key, title)| {
            if key != view.sort.key {
                return title.to_owned();
            }
            let marker = match view.sort.order {
                Order::Ascending => '↑',
                Order::Descending => '↓',
            };
            format!("{title} {marker}")
        })
        .collect::<Vec<_>>()
        .join(" | ");

    let mut out = header;
    for user in &view.rows {
        _ = write!(
            out,
            "\n{} | {} | {} | {} | {}",
            user.id,
            user.first_name.as_ref(),
            user.last_name.as_ref(),
            user.email.as_ref(),
            user.department.as_ref(),
        );
    }
    if view.rows.is_empty() {
        out.push_str("\nNo users found");
    }
    _ = write!(out, "\n{}", view.window);
    match view.window {
        Info::Paged(page) => {
            if page.has_previous_page() {
                out.push_str(" | < previous");
            }
            if page.has_next_page() {
                out.push_str(" | next >");
            }
        }
        Info::Growing(growth) => {
            if growth.has_more() {
                out.push_str(" | more below");
            }
        }
    }
    out
}
