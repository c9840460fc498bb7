//! Placeholder page shells.
//!
//! Real rendering is a downstream concern; these exist so the guard and the
//! CSP nonce can be exercised end to end. Each shell threads the per-request
//! nonce into its inline script tag.

use axum::Extension;
use axum::http::StatusCode;
use axum::response::Html;

use crate::headers::CspNonce;

fn shell(title: &str, body: &str, nonce: Option<&str>) -> String {
    let script = nonce.map_or_else(String::new, |nonce| {
        format!(r#"<script nonce="{nonce}">document.documentElement.dataset.ready = "1";</script>"#)
    });
    format!(
        "<!doctype html>\n<html lang=\"id\"><head><meta charset=\"utf-8\"><title>{title} · tany.ai</title></head>\n<body>{body}\n{script}</body></html>"
    )
}

/// `GET /login` — the sign-in form shell.
pub async fn login_page(nonce: Option<Extension<CspNonce>>) -> Html<String> {
    let body = r#"<main><h1>Masuk sebagai admin</h1>
<form method="post" action="/api/auth/login">
<input type="email" name="email" autocomplete="email">
<input type="password" name="password" autocomplete="current-password">
<button type="submit">Masuk</button>
</form></main>"#;
    Html(shell("Masuk", body, nonce.as_ref().map(|n| n.0.0.as_str())))
}

/// `GET /admin` and below — the panel shell, only reachable through the guard.
pub async fn admin_panel(nonce: Option<Extension<CspNonce>>) -> Html<String> {
    let body = "<main><h1>Panel admin</h1></main>";
    Html(shell("Panel admin", body, nonce.as_ref().map(|n| n.0.0.as_str())))
}

/// `GET /403` — also served in place of protected content on role mismatch.
pub async fn forbidden(nonce: Option<Extension<CspNonce>>) -> (StatusCode, Html<String>) {
    let body = r#"<main><h1>Akses ditolak</h1>
<p>Akun Anda tidak memiliki hak akses admin. Silakan hubungi pengelola sistem untuk mendapatkan izin atau gunakan akun lain.</p>
<p><a href="/">Kembali ke beranda</a> · <a href="/login">Masuk sebagai admin</a></p></main>"#;
    (
        StatusCode::FORBIDDEN,
        Html(shell("Akses ditolak", body, nonce.as_ref().map(|n| n.0.0.as_str()))),
    )
}
