//! User list, registration/edit form, detail and delete confirmation.

use axum::response::Html;
use mimamori_core::hospital::{hospital_name, Hospital};
use mimamori_core::pagination::{Pagination, UserListQuery};
use mimamori_core::user::{Gender, User, UserInput};
use mimamori_core::validation::FieldErrors;

use super::{detail_row, escape, hidden, input, layout, select, textarea, Toast, STEP_TENTH};

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

pub struct UserListView<'a> {
    pub users: &'a [User],
    pub pagination: Pagination,
    pub hospitals: &'a [Hospital],
    pub query: &'a UserListQuery,
    pub toast: Option<Toast>,
}

fn hospital_options(hospitals: &[Hospital]) -> Vec<(String, String)> {
    hospitals
        .iter()
        .map(|h| (h.hospital_id.clone(), h.name.clone()))
        .collect()
}

fn hospital_label(user: &User, hospitals: &[Hospital]) -> String {
    match (&user.hospital_name, &user.hospital_id) {
        (Some(name), _) => name.clone(),
        (None, Some(id)) => hospital_name(hospitals, id).to_string(),
        (None, None) => String::new(),
    }
}

/// Hidden inputs that carry the current filters into pager buttons.
fn filter_fields(query: &UserListQuery) -> String {
    let mut html = String::new();
    if let Some(search) = &query.search {
        html.push_str(&hidden("search", search));
    }
    if let Some(id) = &query.hospital_id {
        html.push_str(&hidden("hospitalId", id));
    }
    if let Some(limit) = query.limit {
        html.push_str(&hidden("limit", &limit.to_string()));
    }
    html
}

fn pager(pagination: &Pagination, query: &UserListQuery) -> String {
    if pagination.total_pages <= 1 {
        return String::new();
    }
    let filters = filter_fields(query);
    let mut html = String::from(r#"<div class="pager">"#);
    if pagination.has_prev() {
        html.push_str(&format!(
            r#"<form method="get" action="/users">{filters}<button name="page" value="{}">前へ</button></form>"#,
            pagination.page - 1
        ));
    }
    html.push_str(&format!(
        "<span>{} / {} ページ（全{}件）</span>",
        pagination.page, pagination.total_pages, pagination.total
    ));
    if pagination.has_next() {
        html.push_str(&format!(
            r#"<form method="get" action="/users">{filters}<button name="page" value="{}">次へ</button></form>"#,
            pagination.page + 1
        ));
    }
    html.push_str("</div>");
    html
}

pub fn list_page(view: &UserListView<'_>) -> Html<String> {
    let no_errors = FieldErrors::new();
    let search_form = format!(
        r#"<form method="get" action="/users" class="search">{}{}<button type="submit">検索</button></form>"#,
        input(
            &no_errors,
            "search",
            "氏名・フリガナ・利用者IDで検索",
            "search",
            view.query.search.as_deref(),
            ""
        ),
        select(
            &no_errors,
            "hospitalId",
            "事業所",
            &hospital_options(view.hospitals),
            view.query.hospital_id.as_deref()
        ),
    );

    let rows = if view.users.is_empty() {
        r#"<tr><td colspan="5">該当する利用者はいません</td></tr>"#.to_string()
    } else {
        view.users
            .iter()
            .map(|u| {
                let id = escape(&u.user_id);
                format!(
                    r#"<tr><td><a href="/users/{id}">{id}</a></td><td>{}</td><td>{}</td><td>{}</td><td><a href="/users/{id}/edit">編集</a> <a href="/users/{id}/settings">アラート設定</a></td></tr>"#,
                    escape(&u.name),
                    escape(u.name_kana.as_deref().unwrap_or_default()),
                    escape(&hospital_label(u, view.hospitals)),
                )
            })
            .collect::<String>()
    };

    let body = format!(
        r#"{search_form}
<table>
<thead><tr><th>利用者ID</th><th>氏名</th><th>フリガナ</th><th>事業所</th><th></th></tr></thead>
<tbody>{rows}</tbody>
</table>
{pager}"#,
        pager = pager(&view.pagination, view.query),
    );

    layout("利用者一覧", view.toast.as_ref(), &body)
}

// ---------------------------------------------------------------------------
// Registration / edit form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub enum FormMode<'a> {
    New,
    Edit { user_id: &'a str },
}

pub struct UserFormView<'a> {
    pub mode: FormMode<'a>,
    pub input: &'a UserInput,
    pub errors: &'a FieldErrors,
    pub hospitals: &'a [Hospital],
    pub toast: Option<Toast>,
}

pub fn form_page(view: &UserFormView<'_>) -> Html<String> {
    let i = view.input;
    let e = view.errors;

    let (title, action, id_attrs, submit) = match view.mode {
        FormMode::New => ("利用者登録", "/users".to_string(), "required", "登録する"),
        FormMode::Edit { user_id } => (
            "利用者情報の編集",
            format!("/users/{}", escape(user_id)),
            "readonly",
            "更新する",
        ),
    };

    let genders: Vec<(String, String)> = Gender::ALL
        .iter()
        .map(|g| (g.as_str().to_string(), g.label().to_string()))
        .collect();

    let body = format!(
        r#"<form method="post" action="{action}" novalidate>
<fieldset><legend>基本情報</legend>
{user_id}{name}{name_kana}{gender}{birth_date}
</fieldset>
<fieldset><legend>連絡先</legend>
{email}{phone}{postal_code}{address}{emergency_name}{emergency_phone}
</fieldset>
<fieldset><legend>所属・身体情報</legend>
{hospital}{height}{weight}{resting_hr}
</fieldset>
<fieldset><legend>機器</legend>
{device}{gateway}
</fieldset>
{notes}
<div class="actions"><button type="submit">{submit}</button><a href="/users">キャンセル</a></div>
</form>"#,
        user_id = input(e, "userId", "利用者ID", "text", i.user_id.as_deref(), id_attrs),
        name = input(e, "name", "氏名", "text", i.name.as_deref(), "required"),
        name_kana = input(e, "nameKana", "フリガナ", "text", i.name_kana.as_deref(), ""),
        gender = select(e, "gender", "性別", &genders, i.gender.as_deref()),
        birth_date = input(e, "birthDate", "生年月日", "date", i.birth_date.as_deref(), ""),
        email = input(e, "email", "メールアドレス", "email", i.email.as_deref(), ""),
        phone = input(e, "phone", "電話番号", "tel", i.phone.as_deref(), ""),
        postal_code = input(e, "postalCode", "郵便番号", "text", i.postal_code.as_deref(), ""),
        address = input(e, "address", "住所", "text", i.address.as_deref(), ""),
        emergency_name = input(
            e,
            "emergencyContactName",
            "緊急連絡先（氏名）",
            "text",
            i.emergency_contact_name.as_deref(),
            ""
        ),
        emergency_phone = input(
            e,
            "emergencyContactPhone",
            "緊急連絡先（電話番号）",
            "tel",
            i.emergency_contact_phone.as_deref(),
            ""
        ),
        hospital = select(
            e,
            "hospitalId",
            "所属事業所",
            &hospital_options(view.hospitals),
            i.hospital_id.as_deref()
        ),
        height = input(e, "heightCm", "身長 (cm)", "number", i.height_cm.as_deref(), STEP_TENTH),
        weight = input(e, "weightKg", "体重 (kg)", "number", i.weight_kg.as_deref(), STEP_TENTH),
        resting_hr = input(
            e,
            "restingHeartRate",
            "安静時心拍数 (bpm)",
            "number",
            i.resting_heart_rate.as_deref(),
            ""
        ),
        device = input(e, "deviceId", "ウェアラブル機器ID", "text", i.device_id.as_deref(), ""),
        gateway = input(e, "gatewayId", "ゲートウェイID", "text", i.gateway_id.as_deref(), ""),
        notes = textarea(e, "notes", "備考", i.notes.as_deref()),
    );

    layout(title, view.toast.as_ref(), &body)
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

fn format_number(value: Option<f64>, unit: &str) -> Option<String> {
    value.map(|v| format!("{v} {unit}"))
}

pub fn detail_page(user: &User, toast: Option<&Toast>) -> Html<String> {
    let id = escape(&user.user_id);
    let gender = user.gender.map(Gender::label);
    let birth = user.birth_date.as_ref().map(|b| match user.age() {
        Some(age) => format!("{b}（{age}歳）"),
        None => b.clone(),
    });
    let hospital = user.hospital_name.as_ref().or(user.hospital_id.as_ref());

    let rows = [
        detail_row("利用者ID", Some(user.user_id.as_str())),
        detail_row("氏名", Some(user.name.as_str())),
        detail_row("フリガナ", user.name_kana.as_deref()),
        detail_row("性別", gender),
        detail_row("生年月日", birth.as_deref()),
        detail_row("メールアドレス", user.email.as_deref()),
        detail_row("電話番号", user.phone.as_deref()),
        detail_row("郵便番号", user.postal_code.as_deref()),
        detail_row("住所", user.address.as_deref()),
        detail_row("所属事業所", hospital.map(String::as_str)),
        detail_row("緊急連絡先（氏名）", user.emergency_contact_name.as_deref()),
        detail_row("緊急連絡先（電話番号）", user.emergency_contact_phone.as_deref()),
        detail_row("身長", format_number(user.height_cm, "cm").as_deref()),
        detail_row("体重", format_number(user.weight_kg, "kg").as_deref()),
        detail_row(
            "安静時心拍数",
            user.resting_heart_rate.map(|v| format!("{v} bpm")).as_deref(),
        ),
        detail_row("ウェアラブル機器ID", user.device_id.as_deref()),
        detail_row("ゲートウェイID", user.gateway_id.as_deref()),
        detail_row("備考", user.notes.as_deref()),
        detail_row("登録日時", user.created_at.as_deref()),
        detail_row("更新日時", user.updated_at.as_deref()),
    ]
    .concat();

    let body = format!(
        r#"<dl>{rows}</dl>
<div class="actions">
<a href="/users/{id}/edit">編集</a>
<a href="/users/{id}/settings">アラート設定</a>
<a href="/users/{id}/delete">削除</a>
<a href="/users">一覧へ戻る</a>
</div>"#
    );

    layout(&format!("{} さん", user.name), toast, &body)
}

// ---------------------------------------------------------------------------
// Delete confirmation
// ---------------------------------------------------------------------------

/// Confirmation step before `POST /users/{id}/delete`.
///
/// `name` is absent when the user record could not be reloaded.
pub fn delete_page(user_id: &str, name: Option<&str>, toast: Option<&Toast>) -> Html<String> {
    let id = escape(user_id);
    let who = match name {
        Some(name) => format!("{}（{id}）", escape(name)),
        None => id.clone(),
    };
    let body = format!(
        r#"<p>{who} さんを削除します。アラート設定や機器の紐付けも解除されます。この操作は取り消せません。</p>
<form method="post" action="/users/{id}/delete">
<div class="actions"><button type="submit" class="danger">削除する</button><a href="/users/{id}">キャンセル</a></div>
</form>"#
    );
    layout("利用者の削除", toast, &body)
}
