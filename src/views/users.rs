use std::fmt::Write;

use super::{Chrome, attr, text};
use crate::db::Account;

#[must_use]
pub fn render(chrome: &Chrome<'_>, accounts: &[Account], min_password_length: usize) -> String {
    let mut body = String::from(
        r#"<div class="card">
  <div class="card-header"><div class="card-title">Manage users</div></div>
  <div class="table-wrap">
  <table>
    <thead><tr><th>Username</th><th>Name</th><th>Role</th><th></th></tr></thead>
    <tbody>
"#,
    );

    for account in accounts {
        let role = if account.is_admin {
            r#"<span class="badge badge-admin">Admin</span>"#
        } else {
            r#"<span class="badge">Staff</span>"#
        };

        let delete = if account.id == chrome.account.id {
            String::new()
        } else {
            format!(
                r#"<a href="/usuarios/excluir/{id}" class="act act-minus" data-confirm="Delete {username}?" onclick="return confirm(this.dataset.confirm)">Delete</a>"#,
                id = account.id,
                username = attr(&account.username),
            )
        };

        let _ = writeln!(
            body,
            r#"    <tr><td><span class="code">{username}</span></td><td>{name}</td><td>{role}</td><td class="right">{delete}</td></tr>"#,
            username = text(&account.username),
            name = text(&account.display_name),
        );
    }

    let _ = writeln!(
        body,
        r#"    </tbody>
  </table>
  </div>
</div>
<div class="card">
  <div class="card-title">New user</div>
  <form method="post" action="/usuarios/criar" class="stacked">
    <label>Username <input type="text" name="username" required></label>
    <label>Full name <input type="text" name="nome" required></label>
    <label>Password <input type="password" name="password" minlength="{min_password_length}" required></label>
    <label>Role
      <select name="is_admin">
        <option value="0">Staff</option>
        <option value="1">Admin</option>
      </select>
    </label>
    <button type="submit" class="btn btn-primary">Create user</button>
  </form>
</div>"#
    );

    chrome.wrap(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::NavItem;

    fn account(id: i32, username: &str, is_admin: bool) -> Account {
        Account {
            id,
            username: username.to_string(),
            display_name: username.to_uppercase(),
            is_admin,
            created_at: String::new(),
        }
    }

    #[test]
    fn own_row_has_no_delete_link() {
        let me = account(1, "admin", true);
        let other = account(2, "ti", false);
        let chrome = Chrome {
            title: "Users",
            active: NavItem::Users,
            account: &me,
            flashes: &[],
        };

        let html = render(&chrome, &[me.clone(), other], 6);
        assert!(!html.contains("/usuarios/excluir/1"));
        assert!(html.contains("/usuarios/excluir/2"));
        assert!(html.contains("Staff"));
        assert!(html.contains(r#"minlength="6""#));
    }

    #[test]
    fn delete_prompt_keeps_odd_usernames_out_of_script() {
        let me = account(1, "admin", true);
        let odd = account(2, "o'neil\n\"x\"", false);
        let chrome = Chrome {
            title: "Users",
            active: NavItem::Users,
            account: &me,
            flashes: &[],
        };

        let html = render(&chrome, &[me.clone(), odd], 6);
        assert!(html.contains(r#"onclick="return confirm(this.dataset.confirm)""#));
        assert!(html.contains(r#"data-confirm="Delete o'neil"#));
        assert!(html.contains("&quot;x&quot;?\""));
        assert!(!html.contains("confirm('"));
    }
}
