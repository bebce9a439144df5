//! First-run content.
//!
//! Each collection gets a fixed default set the first time it is found empty.
//! [`seed_all`] is safe to call on every start: collections that already hold
//! documents are left alone.
//!
//! The default magazine plan fills the 14-page budget exactly, with the photo
//! spread landing on the color pages.

use crate::error::Result;
use crate::model::glossary::GlossaryTerm;
use crate::model::improvements::{Improvement, ImprovementStatus, Priority};
use crate::model::magazine::{MagazineSection, SectionStatus, Task, TaskKind};
use crate::model::schedule::ScheduleEvent;
use crate::model::{to_fields, Collection, Fields};
use crate::store::DataStore;
use chrono::NaiveDate;
use tracing::debug;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn event(
    order: i64,
    on: NaiveDate,
    title: &str,
    description: &str,
    location: Option<&str>,
    details: &[&str],
    is_highlight: bool,
) -> ScheduleEvent {
    ScheduleEvent {
        date: on,
        title: title.to_string(),
        description: description.to_string(),
        location: location.map(str::to_string),
        details: details.iter().map(|d| d.to_string()).collect(),
        notes: String::new(),
        is_highlight,
        order,
    }
}

#[rustfmt::skip]
pub fn schedule() -> Vec<ScheduleEvent> {
    vec![
        event(1, date(2026, 4, 18), "新年度役員会", "今年度の役員体制と年間計画を確認", Some("同窓会館 会議室"), &["役員名簿の確定", "年間予算案の審議"], false),
        event(2, date(2026, 5, 23), "会報原稿締切", "各担当から会報原稿を回収", None, &[], false),
        event(3, date(2026, 6, 14), "定期総会・懇親会", "年に一度の総会と懇親会", Some("ホテル本館 2F 宴会場"), &["事業報告・会計報告", "新役員の承認", "懇親会"], true),
        event(4, date(2026, 8, 8), "会報発送", "印刷済み会報を全会員へ発送", Some("事務局"), &["宛名ラベル印刷", "発送作業"], false),
        event(5, date(2026, 11, 3), "母校文化祭 同窓会ブース", "在校生との交流ブースを出展", Some("母校 体育館"), &[], true),
        event(6, date(2027, 3, 1), "卒業式 新会員歓迎", "卒業生へ入会案内を配布", Some("母校 講堂"), &["入会案内の準備"], false),
    ]
}

fn improvement(
    order: i64,
    title: &str,
    description: &str,
    target: NaiveDate,
    status: ImprovementStatus,
    priority: Priority,
) -> Improvement {
    Improvement {
        title: title.to_string(),
        description: description.to_string(),
        target_date: target,
        notes: String::new(),
        status,
        priority,
        order,
    }
}

#[rustfmt::skip]
pub fn improvements() -> Vec<Improvement> {
    vec![
        improvement(1, "会員名簿の電子化", "紙の名簿を表計算に移し、住所変更を一元管理する", date(2026, 6, 30), ImprovementStatus::InProgress, Priority::High),
        improvement(2, "会費納入方法の追加", "振込に加えてオンライン決済を導入する", date(2026, 9, 30), ImprovementStatus::Pending, Priority::Medium),
        improvement(3, "役員引継ぎ資料の整備", "役割ごとの年間作業を文書化する", date(2026, 5, 31), ImprovementStatus::Pending, Priority::High),
        improvement(4, "連絡網の見直し", "各期幹事への連絡をメールとチャットに統一する", date(2026, 7, 31), ImprovementStatus::Done, Priority::Low),
    ]
}

fn term(term: &str, reading: Option<&str>, description: &str, category: &str, related: &[&str]) -> GlossaryTerm {
    GlossaryTerm {
        term: term.to_string(),
        reading: reading.map(str::to_string),
        description: description.to_string(),
        category: category.to_string(),
        related_terms: related.iter().map(|r| r.to_string()).collect(),
    }
}

#[rustfmt::skip]
pub fn glossary() -> Vec<GlossaryTerm> {
    vec![
        term("理事会", Some("りじかい"), "同窓会の運営方針を決める役員の会議", "組織", &["会長", "事務局"]),
        term("事務局", Some("じむきょく"), "会員管理や発送などの実務を担う部署", "組織", &["理事会"]),
        term("定期総会", Some("ていきそうかい"), "全会員を対象に年一回開く最高議決機関", "同窓会", &["会計報告"]),
        term("会計報告", Some("かいけいほうこく"), "前年度の収支を総会で報告すること", "同窓会", &["定期総会", "監事"]),
        term("会長", Some("かいちょう"), "同窓会を代表し理事会を招集する", "役割", &["理事会"]),
        term("期幹事", Some("きかんじ"), "各卒業期の連絡窓口となる会員", "役割", &["事務局"]),
        term("監事", Some("かんじ"), "会計と業務執行を監査する", "役割", &["会計報告"]),
    ]
}

fn task(id: &str, kind: TaskKind, description: &str, assignee: &str, completed: bool) -> Task {
    Task {
        id: id.to_string(),
        kind,
        description: description.to_string(),
        assignee: assignee.to_string(),
        completed,
    }
}

#[allow(clippy::too_many_arguments)]
fn section(
    order: i64,
    title: &str,
    pages: f64,
    deadline: NaiveDate,
    assignee: &str,
    role: Option<&str>,
    status: SectionStatus,
    tasks: Vec<Task>,
) -> MagazineSection {
    MagazineSection {
        title: title.to_string(),
        pages,
        deadline: Some(deadline),
        assignee: assignee.to_string(),
        assignee_role: role.map(str::to_string),
        status,
        notes: String::new(),
        tasks,
        order,
        is_color_page: None,
    }
}

#[rustfmt::skip]
pub fn magazine() -> Vec<MagazineSection> {
    let due = date(2026, 5, 23);
    let mut plan = vec![
        section(1, "会長挨拶", 1.0, due, "会長", Some("会長"), SectionStatus::Review, vec![
            task("t1", TaskKind::Text, "挨拶文 800字", "会長", true),
            task("t2", TaskKind::Photo, "顔写真", "事務局", false),
        ]),
        section(2, "学校長挨拶", 1.0, due, "事務局", Some("事務局"), SectionStatus::Requesting, vec![
            task("t1", TaskKind::Text, "原稿依頼", "事務局", true),
        ]),
        section(3, "総会報告", 2.0, date(2026, 6, 30), "広報", None, SectionStatus::NotStarted, vec![
            task("t1", TaskKind::Text, "議事要旨", "広報", false),
            task("t2", TaskKind::Photo, "総会写真", "広報", false),
        ]),
        section(4, "卒業生インタビュー", 2.0, due, "編集長", None, SectionStatus::InProgress, vec![
            task("t1", TaskKind::Text, "インタビュー取材", "編集長", true),
            task("t2", TaskKind::Text, "原稿整理", "編集長", false),
        ]),
        section(5, "懇親会フォトギャラリー", 2.0, date(2026, 6, 30), "広報", None, SectionStatus::NotStarted, vec![
            task("t1", TaskKind::Photo, "写真選定", "広報", false),
        ]),
        section(6, "各期だより", 4.0, due, "期幹事", Some("期幹事"), SectionStatus::Requesting, vec![
            task("t1", TaskKind::Text, "各期へ原稿依頼", "事務局", true),
            task("t2", TaskKind::Text, "原稿回収", "事務局", false),
        ]),
        section(7, "会計報告", 1.0, date(2026, 6, 30), "会計", Some("会計"), SectionStatus::NotStarted, vec![
            task("t1", TaskKind::Data, "決算書", "会計", false),
        ]),
        section(8, "事務局だより", 0.6, due, "事務局", None, SectionStatus::Done, Vec::new()),
        section(9, "編集後記", 0.4, date(2026, 7, 10), "編集長", None, SectionStatus::NotStarted, Vec::new()),
    ];
    plan[4].is_color_page = Some(true);
    plan
}

/// Default documents for `collection`, as stored field maps.
pub fn defaults(collection: Collection) -> Result<Vec<Fields>> {
    match collection {
        Collection::Schedule => schedule().iter().map(to_fields).collect(),
        Collection::Improvements => improvements().iter().map(to_fields).collect(),
        Collection::Glossary => glossary().iter().map(to_fields).collect(),
        Collection::Magazine => magazine().iter().map(to_fields).collect(),
    }
}

/// Seed every empty collection. Returns the collections that were seeded.
pub fn seed_all<S: DataStore>(store: &mut S) -> Result<Vec<Collection>> {
    let mut seeded = Vec::new();
    for collection in Collection::ALL {
        if store.seed_if_empty(collection, defaults(collection)?)? {
            seeded.push(collection);
        } else {
            debug!(%collection, "collection already has data, not seeding");
        }
    }
    Ok(seeded)
}
