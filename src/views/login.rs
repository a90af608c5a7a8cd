use super::layout::{document, render_flashes};
use crate::api::flash::Flash;

#[must_use]
pub fn render(flashes: &[Flash]) -> String {
    let body = format!(
        r#"<main class="narrow">
  <div class="card login">
    <h1>Toner Inventory</h1>
    <p class="muted">Sign in to manage the toner stock.</p>
{flashes}    <form method="post" action="/login">
      <label>Username <input type="text" name="username" autocomplete="username" required autofocus></label>
      <label>Password <input type="password" name="password" autocomplete="current-password" required></label>
      <button class="btn btn-primary" type="submit">Sign in</button>
    </form>
  </div>
</main>"#,
        flashes = render_flashes(flashes),
    );

    document("Sign in", &body)
}
