//! One-shot notices carried across post/redirect/get.
//!
//! Only a short code travels in the query string; the text shown is looked
//! up here, so arbitrary strings never reach the page through the URL.

use axum::response::Redirect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    UserCreated,
    UserUpdated,
    UserDeleted,
    SettingsSaved,
    HospitalCreated,
    HospitalUpdated,
    HospitalDeleted,
}

impl Notice {
    const ALL: [Notice; 7] = [
        Notice::UserCreated,
        Notice::UserUpdated,
        Notice::UserDeleted,
        Notice::SettingsSaved,
        Notice::HospitalCreated,
        Notice::HospitalUpdated,
        Notice::HospitalDeleted,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Notice::UserCreated => "user_created",
            Notice::UserUpdated => "user_updated",
            Notice::UserDeleted => "user_deleted",
            Notice::SettingsSaved => "settings_saved",
            Notice::HospitalCreated => "hospital_created",
            Notice::HospitalUpdated => "hospital_updated",
            Notice::HospitalDeleted => "hospital_deleted",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::UserCreated => "利用者を登録しました",
            Notice::UserUpdated => "利用者情報を更新しました",
            Notice::UserDeleted => "利用者を削除しました",
            Notice::SettingsSaved => "アラート設定を保存しました",
            Notice::HospitalCreated => "事業所を登録しました",
            Notice::HospitalUpdated => "事業所情報を更新しました",
            Notice::HospitalDeleted => "事業所を削除しました",
        }
    }

    /// Unknown codes are ignored.
    pub fn from_code(code: Option<&str>) -> Option<Self> {
        let code = code?;
        Self::ALL.into_iter().find(|n| n.code() == code)
    }
}

/// 303 to `path` carrying `notice`. `path` must not already have a query.
pub fn redirect_with(path: &str, notice: Notice) -> Redirect {
    Redirect::to(&format!("{path}?notice={}", notice.code()))
}
