//! Server-rendered HTML.
//!
//! Pages are built with `format!` into [`Html<String>`]. Every piece of text
//! that came from the backend or from a form goes through [`escape`] first.

pub mod hospitals;
pub mod settings;
pub mod users;

use axum::http::StatusCode;
use axum::response::Html;
use mimamori_core::validation::FieldErrors;

use crate::flash::Notice;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Toasts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

/// Transient notice at the top of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }

    /// Success toast for a `?notice=` code, if it is a known one.
    pub fn from_notice(code: Option<&str>) -> Option<Self> {
        Notice::from_code(code).map(|n| Self::success(n.message()))
    }

    fn render(&self) -> String {
        let (class, role) = match self.kind {
            ToastKind::Success => ("toast toast-success", "status"),
            ToastKind::Error => ("toast toast-error", "alert"),
            ToastKind::Info => ("toast toast-info", "status"),
        };
        format!(
            r#"<div class="{class}" role="{role}">{}</div>"#,
            escape(&self.message)
        )
    }
}

/// Validation failure toast shown above a re-rendered form.
pub fn invalid_form_toast() -> Toast {
    Toast::error("入力内容を確認してください")
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

const STYLE: &str = r#"
body { font-family: "Hiragino Sans", "Noto Sans JP", sans-serif; margin: 0; background: #f5f6f8; color: #222; }
header { background: #2f6f8f; color: #fff; padding: 12px 24px; display: flex; gap: 24px; align-items: center; }
header a { color: #fff; text-decoration: none; }
header .brand { font-weight: bold; font-size: 1.1em; }
main { max-width: 960px; margin: 24px auto; background: #fff; padding: 24px; border-radius: 8px; box-shadow: 0 1px 4px rgba(0,0,0,0.08); }
.toast { padding: 10px 14px; border-radius: 6px; margin-bottom: 16px; }
.toast-success { background: #e6f4ea; color: #1e6b34; }
.toast-error { background: #fdecea; color: #a12622; }
.toast-info { background: #e8f0fe; color: #1a4b8c; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e3e3e3; }
.field { margin-bottom: 12px; }
.field label { display: block; font-size: 0.9em; margin-bottom: 4px; }
.field input, .field select, .field textarea { width: 100%; padding: 6px; box-sizing: border-box; }
.field-error { color: #a12622; font-size: 0.85em; margin: 4px 0 0; }
.actions { display: flex; gap: 12px; margin-top: 16px; }
.danger { background: #c62828; color: #fff; border: none; padding: 8px 16px; border-radius: 4px; }
.pager { display: flex; gap: 12px; margin-top: 12px; }
fieldset { border: 1px solid #e3e3e3; border-radius: 6px; margin-bottom: 16px; }
"#;

/// Wrap `body` in the shared page chrome.
pub fn layout(title: &str, toast: Option<&Toast>, body: &str) -> Html<String> {
    let toast = toast.map(Toast::render).unwrap_or_default();
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | 見守りサービス管理</title>
<style>{STYLE}</style>
</head>
<body>
<header>
<span class="brand">見守りサービス管理</span>
<a href="/users">利用者一覧</a>
<a href="/users/new">新規登録</a>
<a href="/hospitals">事業所管理</a>
</header>
<main>
{toast}
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    ))
}

/// Standalone page for an error that prevented the real page from loading.
pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let heading = match status {
        StatusCode::NOT_FOUND => "見つかりません",
        _ => "エラー",
    };
    layout(
        heading,
        Some(&Toast::error(message)),
        r#"<p><a href="/users">利用者一覧へ戻る</a></p>"#,
    )
}

// ---------------------------------------------------------------------------
// Form controls
// ---------------------------------------------------------------------------

fn field_error(errors: &FieldErrors, name: &str) -> (String, &'static str) {
    match errors.get(name) {
        Some(msg) => (
            format!(r#"<p class="field-error">{}</p>"#, escape(msg)),
            r#" aria-invalid="true""#,
        ),
        None => (String::new(), ""),
    }
}

/// `extra` for decimal inputs with one fractional digit.
pub const STEP_TENTH: &str = r#"step="0.1""#;

/// Labelled `<input>` with its validation message.
///
/// `extra` is trusted markup (e.g. `required step="0.1"`).
pub fn input(
    errors: &FieldErrors,
    name: &str,
    label: &str,
    input_type: &str,
    value: Option<&str>,
    extra: &str,
) -> String {
    let (error, invalid) = field_error(errors, name);
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><input type="{input_type}" id="{name}" name="{name}" value="{value}" {extra}{invalid}>{error}</div>"#,
        label = escape(label),
        value = escape(value.unwrap_or_default()),
    )
}

pub fn textarea(errors: &FieldErrors, name: &str, label: &str, value: Option<&str>) -> String {
    let (error, invalid) = field_error(errors, name);
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><textarea id="{name}" name="{name}" rows="4"{invalid}>{value}</textarea>{error}</div>"#,
        label = escape(label),
        value = escape(value.unwrap_or_default()),
    )
}

/// Labelled `<select>` with a leading blank option.
pub fn select(
    errors: &FieldErrors,
    name: &str,
    label: &str,
    options: &[(String, String)],
    selected: Option<&str>,
) -> String {
    let (error, invalid) = field_error(errors, name);
    let mut opts = String::from(r#"<option value="">（未選択）</option>"#);
    for (value, text) in options {
        let sel = if selected == Some(value.as_str()) {
            " selected"
        } else {
            ""
        };
        opts.push_str(&format!(
            r#"<option value="{}"{sel}>{}</option>"#,
            escape(value),
            escape(text)
        ));
    }
    format!(
        r#"<div class="field"><label for="{name}">{label}</label><select id="{name}" name="{name}"{invalid}>{opts}</select>{error}</div>"#,
        label = escape(label),
    )
}

pub fn hidden(name: &str, value: &str) -> String {
    format!(
        r#"<input type="hidden" name="{name}" value="{}">"#,
        escape(value)
    )
}

pub fn checkbox(name: &str, label: &str, checked: bool) -> String {
    let checked = if checked { " checked" } else { "" };
    format!(
        r#"<div class="field"><label><input type="checkbox" name="{name}" value="on"{checked}> {label}</label></div>"#,
        label = escape(label),
    )
}

/// `<dt>/<dd>` pair for detail pages; missing values show a dash.
pub fn detail_row(label: &str, value: Option<&str>) -> String {
    let value = value.filter(|v| !v.is_empty()).unwrap_or("—");
    format!("<dt>{}</dt><dd>{}</dd>", escape(label), escape(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn escape_leaves_japanese_alone() {
        assert_eq!(escape("山田 太郎"), "山田 太郎");
    }

    #[test]
    fn input_shows_error_and_escaped_value() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "メールアドレスの形式が正しくありません");
        let html = input(&errors, "email", "メール", "email", Some("\"x\""), "");
        assert!(html.contains(r#"value="&quot;x&quot;""#));
        assert!(html.contains(r#"aria-invalid="true""#));
        assert!(html.contains("メールアドレスの形式が正しくありません"));
    }

    #[test]
    fn select_marks_current_value() {
        let options = vec![
            ("h1".to_string(), "中央病院".to_string()),
            ("h2".to_string(), "北クリニック".to_string()),
        ];
        let html = select(&FieldErrors::new(), "hospitalId", "事業所", &options, Some("h2"));
        assert!(html.contains(r#"<option value="h2" selected>北クリニック</option>"#));
        assert!(!html.contains(r#"<option value="h1" selected>"#));
    }

    #[test]
    fn toast_message_is_escaped() {
        let html = layout("t", Some(&Toast::error("<b>x</b>")), "");
        assert!(html.0.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(html.0.contains(r#"role="alert""#));
    }

    #[test]
    fn known_notice_becomes_success_toast() {
        let toast = Toast::from_notice(Some("user_created")).unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.message, "利用者を登録しました");
    }
}
