use std::fmt::Write;

use super::{STYLESHEET, attr, text};
use crate::api::flash::Flash;
use crate::db::Account;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Inventory,
    History,
    Dashboard,
    Users,
}

impl NavItem {
    const fn href(self) -> &'static str {
        match self {
            Self::Inventory => "/",
            Self::History => "/historico",
            Self::Dashboard => "/dashboard",
            Self::Users => "/usuarios",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Inventory => "Inventory",
            Self::History => "History",
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
        }
    }
}

/// Everything an authenticated page shares: header, navigation and flashes.
pub struct Chrome<'a> {
    pub title: &'a str,
    pub active: NavItem,
    pub account: &'a Account,
    pub flashes: &'a [Flash],
}

impl Chrome<'_> {
    /// Wraps a page body in the authenticated layout.
    #[must_use]
    pub fn wrap(&self, body: &str) -> String {
        let mut nav = String::new();
        let mut items = vec![NavItem::Inventory, NavItem::History, NavItem::Dashboard];
        if self.account.is_admin {
            items.push(NavItem::Users);
        }
        for item in items {
            let class = if item == self.active { " class=\"active\"" } else { "" };
            let _ = write!(
                nav,
                r#"<a href="{}"{}>{}</a>"#,
                item.href(),
                class,
                item.label()
            );
        }

        let role = if self.account.is_admin {
            r#" <span class="badge badge-admin">Admin</span>"#
        } else {
            ""
        };

        let content = format!(
            r#"<header class="topbar">
  <div class="brand">Toner Inventory</div>
  <nav>{nav}</nav>
  <div class="who">{name}{role} <a class="logout" href="/logout">Log out</a></div>
</header>
<main>
  <h1>{title}</h1>
{flashes}{body}
</main>"#,
            name = text(&self.account.display_name),
            title = text(self.title),
            flashes = render_flashes(self.flashes),
        );

        document(self.title, &content)
    }
}

pub(super) fn render_flashes(flashes: &[Flash]) -> String {
    let mut out = String::new();
    for flash in flashes {
        let _ = writeln!(
            out,
            r#"  <div class="flash {}">{}</div>"#,
            flash.kind.css_class(),
            text(&flash.message)
        );
    }
    out
}

pub(super) fn document(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLESHEET}</style>
</head>
<body>
{content}
</body>
</html>
"#,
        title = attr(title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(is_admin: bool) -> Account {
        Account {
            id: 1,
            username: "ana".to_string(),
            display_name: "Ana <QA>".to_string(),
            is_admin,
            created_at: String::new(),
        }
    }

    #[test]
    fn users_link_is_admin_only() {
        let staff = account(false);
        let chrome = Chrome {
            title: "Inventory",
            active: NavItem::Inventory,
            account: &staff,
            flashes: &[],
        };
        let html = chrome.wrap("");
        assert!(!html.contains("/usuarios"));
        assert!(html.contains("Ana &lt;QA&gt;"));

        let admin = account(true);
        let chrome = Chrome {
            account: &admin,
            ..chrome
        };
        assert!(chrome.wrap("").contains(r#"href="/usuarios""#));
    }

    #[test]
    fn flashes_are_rendered_with_their_kind() {
        let flashes = vec![Flash::success("Saved"), Flash::error("<oops>")];
        let html = render_flashes(&flashes);
        assert!(html.contains("flash-success\">Saved"));
        assert!(html.contains("flash-error\">&lt;oops&gt;"));
    }
}
