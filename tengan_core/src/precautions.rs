//! Lifestyle precaution rule table.
//!
//! A pure function of days-since-surgery over the clinic's recovery
//! chart. The buckets are day 0, days 1-3, days 4-6 and day 7 onward;
//! the seven activities and their notes are content fixed by the chart,
//! reproduced verbatim.

use crate::types::{PrecautionItem, PrecautionStatus};

/// Derive the current guidance row for each of the seven activities.
///
/// Stateless and idempotent; the list order is fixed.
pub fn precautions_for(days_post_op: i64) -> Vec<PrecautionItem> {
    let is_day0 = days_post_op == 0;
    let is_day1_to_3 = (1..=3).contains(&days_post_op);
    let is_day4_to_6 = (4..=6).contains(&days_post_op);
    let is_week1_plus = days_post_op >= 7;

    vec![
        PrecautionItem {
            label: "保護用眼帯 (就寝時)",
            // NG means the restriction still applies (must wear)
            status: if is_week1_plus {
                PrecautionStatus::Ok
            } else {
                PrecautionStatus::Ng
            },
            note: if is_week1_plus {
                "不要"
            } else {
                "就寝時は必ず装着してください (1週間)"
            },
        },
        PrecautionItem {
            label: "洗顔・洗髪",
            status: if is_day0 || is_day1_to_3 {
                PrecautionStatus::Ng
            } else {
                PrecautionStatus::Ok
            },
            note: if is_day0 {
                "不可 (美容室も不可)"
            } else if is_day1_to_3 {
                "不可 (顔は濡れタオル・美容室での洗髪は可)"
            } else {
                "可 (目に水が入らないように)"
            },
        },
        PrecautionItem {
            label: "お風呂 (入浴)",
            status: if is_week1_plus {
                PrecautionStatus::Ok
            } else if is_day4_to_6 {
                PrecautionStatus::Caution
            } else {
                PrecautionStatus::Ng
            },
            note: if is_day0 || is_day1_to_3 {
                "不可 (首から下のシャワーのみ可)"
            } else if is_day4_to_6 {
                "短時間の入浴可"
            } else {
                "通常通り可"
            },
        },
        PrecautionItem {
            label: "メイク",
            status: if is_week1_plus {
                PrecautionStatus::Ok
            } else if is_day0 {
                PrecautionStatus::Ng
            } else {
                PrecautionStatus::Caution
            },
            note: if is_day0 {
                "不可"
            } else if is_week1_plus {
                "全メイク可"
            } else {
                "目の周り以外は可 (アイメイク不可)"
            },
        },
        PrecautionItem {
            label: "アルコール・タバコ",
            status: if is_week1_plus {
                PrecautionStatus::Ok
            } else {
                PrecautionStatus::Ng
            },
            note: if is_week1_plus { "許可" } else { "不可" },
        },
        PrecautionItem {
            label: "運動",
            status: if is_week1_plus {
                PrecautionStatus::Caution
            } else {
                PrecautionStatus::Ng
            },
            note: if is_week1_plus {
                "軽い運動は可 (激しいものは1ヶ月後)"
            } else {
                "不可"
            },
        },
        PrecautionItem {
            label: "仕事 (PC/事務)",
            status: if is_day0 {
                PrecautionStatus::Ng
            } else {
                PrecautionStatus::Ok
            },
            note: if is_day0 {
                "不可"
            } else {
                "翌日からデスクワーク可 (疲れない程度に)"
            },
        },
    ]
}
