//! Facility list with inline registration, edit form and delete confirmation.

use axum::response::Html;
use mimamori_core::hospital::{Hospital, HospitalInput};
use mimamori_core::validation::FieldErrors;

use super::{escape, input, layout, Toast};

fn fields(input_values: &HospitalInput, errors: &FieldErrors) -> String {
    let i = input_values;
    [
        input(errors, "name", "事業所名", "text", i.name.as_deref(), "required"),
        input(errors, "postalCode", "郵便番号", "text", i.postal_code.as_deref(), ""),
        input(errors, "address", "住所", "text", i.address.as_deref(), ""),
        input(errors, "phone", "電話番号", "tel", i.phone.as_deref(), ""),
        input(errors, "email", "メールアドレス", "email", i.email.as_deref(), ""),
        input(errors, "contactPerson", "担当者名", "text", i.contact_person.as_deref(), ""),
    ]
    .concat()
}

pub struct HospitalListView<'a> {
    pub hospitals: &'a [Hospital],
    /// Values for the registration form below the table.
    pub input: &'a HospitalInput,
    pub errors: &'a FieldErrors,
    pub toast: Option<Toast>,
}

pub fn list_page(view: &HospitalListView<'_>) -> Html<String> {
    let rows = if view.hospitals.is_empty() {
        r#"<tr><td colspan="5">登録されている事業所はありません</td></tr>"#.to_string()
    } else {
        view.hospitals
            .iter()
            .map(|h| {
                let id = escape(&h.hospital_id);
                format!(
                    r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td><a href="/hospitals/{id}/edit">編集</a> <a href="/hospitals/{id}/delete">削除</a></td></tr>"#,
                    escape(&h.name),
                    escape(h.address.as_deref().unwrap_or_default()),
                    escape(h.phone.as_deref().unwrap_or_default()),
                    escape(h.contact_person.as_deref().unwrap_or_default()),
                )
            })
            .collect::<String>()
    };

    let body = format!(
        r#"<table>
<thead><tr><th>事業所名</th><th>住所</th><th>電話番号</th><th>担当者</th><th></th></tr></thead>
<tbody>{rows}</tbody>
</table>
<h2>事業所の登録</h2>
<form method="post" action="/hospitals" novalidate>
{fields}
<div class="actions"><button type="submit">登録する</button></div>
</form>"#,
        fields = fields(view.input, view.errors),
    );

    layout("事業所管理", view.toast.as_ref(), &body)
}

pub fn edit_page(
    hospital_id: &str,
    input_values: &HospitalInput,
    errors: &FieldErrors,
    toast: Option<&Toast>,
) -> Html<String> {
    let id = escape(hospital_id);
    let body = format!(
        r#"<form method="post" action="/hospitals/{id}" novalidate>
{fields}
<div class="actions"><button type="submit">更新する</button><a href="/hospitals">キャンセル</a></div>
</form>"#,
        fields = fields(input_values, errors),
    );
    layout("事業所情報の編集", toast, &body)
}

pub fn delete_page(hospital: &Hospital, toast: Option<&Toast>) -> Html<String> {
    let id = escape(&hospital.hospital_id);
    let body = format!(
        r#"<p>{} を削除します。所属している利用者の事業所は未設定になります。この操作は取り消せません。</p>
<form method="post" action="/hospitals/{id}/delete">
<div class="actions"><button type="submit" class="danger">削除する</button><a href="/hospitals">キャンセル</a></div>
</form>"#,
        escape(&hospital.name)
    );
    layout("事業所の削除", toast, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hospital(id: &str, name: &str) -> Hospital {
        Hospital {
            hospital_id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    #[test]
    fn list_links_each_row_by_id() {
        let hospitals = vec![hospital("h1", "中央病院"), hospital("h2", "北クリニック")];
        let html = list_page(&HospitalListView {
            hospitals: &hospitals,
            input: &HospitalInput::default(),
            errors: &FieldErrors::new(),
            toast: None,
        });
        assert!(html.0.contains(r#"href="/hospitals/h2/edit""#));
        assert!(html.0.contains("<td>北クリニック</td>"));
        assert!(html.0.contains(r#"action="/hospitals""#));
    }

    #[test]
    fn empty_list_says_so() {
        let html = list_page(&HospitalListView {
            hospitals: &[],
            input: &HospitalInput::default(),
            errors: &FieldErrors::new(),
            toast: None,
        });
        assert!(html.0.contains("登録されている事業所はありません"));
    }

    #[test]
    fn edit_form_keeps_submitted_values_and_errors() {
        let input_values = HospitalInput {
            name: Some("".into()),
            phone: Some("abc".into()),
            ..Default::default()
        };
        let mut errors = FieldErrors::new();
        errors.insert("name", "事業所名は必須です");
        let html = edit_page("h1", &input_values, &errors, None);
        assert!(html.0.contains(r#"action="/hospitals/h1""#));
        assert!(html.0.contains(r#"value="abc""#));
        assert!(html.0.contains("事業所名は必須です"));
    }

    #[test]
    fn delete_page_names_the_facility() {
        let html = delete_page(&hospital("h1", "A&B診療所"), None);
        assert!(html.0.contains("A&amp;B診療所 を削除します"));
        assert!(html.0.contains(r#"action="/hospitals/h1/delete""#));
    }
}
