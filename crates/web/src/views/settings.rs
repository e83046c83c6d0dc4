//! Alert threshold form for one user.

use axum::response::Html;
use mimamori_core::settings::AlertSettingsInput;
use mimamori_core::validation::FieldErrors;

use super::{checkbox, escape, input, layout, Toast, STEP_TENTH};

pub struct SettingsView<'a> {
    pub user_id: &'a str,
    /// Display name; absent when only the id is known.
    pub user_name: Option<&'a str>,
    pub input: &'a AlertSettingsInput,
    pub errors: &'a FieldErrors,
    pub toast: Option<Toast>,
}

fn group(legend: &str, controls: &[String]) -> String {
    format!(
        "<fieldset><legend>{legend}</legend>{}</fieldset>",
        controls.concat()
    )
}

const STEP_HALF: &str = r#"step="0.5""#;

fn number(e: &FieldErrors, name: &str, label: &str, value: &Option<String>, attrs: &str) -> String {
    input(e, name, label, "number", value.as_deref(), attrs)
}

pub fn settings_page(view: &SettingsView<'_>) -> Html<String> {
    let i = view.input;
    let e = view.errors;
    let on = AlertSettingsInput::is_checked;
    let id = escape(view.user_id);

    let heart_rate = group(
        "心拍数",
        &[
            checkbox("heartRateEnabled", "心拍数アラートを有効にする", on(&i.heart_rate_enabled)),
            number(e, "heartRateMin", "下限 (bpm)", &i.heart_rate_min, ""),
            number(e, "heartRateMax", "上限 (bpm)", &i.heart_rate_max, ""),
        ],
    );
    let skin_temp = group(
        "皮膚温",
        &[
            checkbox("skinTempEnabled", "皮膚温アラートを有効にする", on(&i.skin_temp_enabled)),
            number(e, "skinTempMin", "下限 (℃)", &i.skin_temp_min, STEP_TENTH),
            number(e, "skinTempMax", "上限 (℃)", &i.skin_temp_max, STEP_TENTH),
        ],
    );
    let steps = group(
        "歩数",
        &[
            checkbox("stepsEnabled", "歩数アラートを有効にする", on(&i.steps_enabled)),
            number(e, "stepsMin", "1日の最低歩数", &i.steps_min, ""),
        ],
    );
    let sleep = group(
        "睡眠",
        &[
            checkbox("sleepEnabled", "睡眠アラートを有効にする", on(&i.sleep_enabled)),
            number(e, "sleepMinHours", "最短 (時間)", &i.sleep_min_hours, STEP_HALF),
            number(e, "sleepMaxHours", "最長 (時間)", &i.sleep_max_hours, STEP_HALF),
        ],
    );
    let no_data = group(
        "無通信",
        &[
            checkbox("noDataEnabled", "無通信アラートを有効にする", on(&i.no_data_enabled)),
            number(e, "noDataMinutes", "検知までの時間 (分)", &i.no_data_minutes, ""),
        ],
    );

    let body = format!(
        r#"<form method="post" action="/users/{id}/settings" novalidate>
{heart_rate}{skin_temp}{steps}{sleep}{no_data}
<div class="actions"><button type="submit">保存する</button><a href="/users/{id}">キャンセル</a></div>
</form>"#
    );

    let title = match view.user_name {
        Some(name) => format!("{name} さんのアラート設定"),
        None => format!("{} のアラート設定", view.user_id),
    };
    layout(&title, view.toast.as_ref(), &body)
}
