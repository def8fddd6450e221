//! Table sort state and dashboard aggregation for surat listings.
//!
//! Pure and referentially transparent: the same records and selectors always
//! produce the same ordering, so callers recompute only when inputs change.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::{Surat, JENIS_KELUAR, JENIS_MASUK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    /// No sort applied, keep the given order.
    #[default]
    None,
    Index,
    Subject,
    Sender,
    Recipient,
    ReceivedAt,
    Disposition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// The two selectors behind a sortable table header row. Exactly one field is
/// active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortState {
    /// Header click: the active field toggles order, a different field takes
    /// over and resets to ascending. `None` always resets to ascending.
    pub fn select(&mut self, field: SortField) {
        if field == SortField::None {
            self.field = SortField::None;
            self.order = SortOrder::Asc;
        } else if field == self.field {
            self.order = self.order.toggled();
        } else {
            self.field = field;
            self.order = SortOrder::Asc;
        }
    }
}

/// Locale comparison for Indonesian text: case-insensitive base ordering,
/// original case as tiebreak so the result stays deterministic.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Missing timestamps sort as epoch zero, i.e. earliest.
fn timestamp_or_epoch(t: Option<DateTime<Utc>>) -> i64 {
    t.map(|t| t.timestamp_millis()).unwrap_or(0)
}

/// Stable in-place sort of a surat listing under the given selectors.
pub fn sort_surat(records: &mut [Surat], state: SortState) {
    if state.field == SortField::None {
        return;
    }

    records.sort_by(|a, b| {
        let ordering = match state.field {
            SortField::None => Ordering::Equal,
            SortField::Index => a.created_at.cmp(&b.created_at),
            SortField::Subject => collate(&a.perihal, &b.perihal),
            SortField::Sender => collate(&a.pengirim, &b.pengirim),
            SortField::Recipient => collate(&a.penerima, &b.penerima),
            SortField::ReceivedAt => {
                timestamp_or_epoch(a.diterima_at).cmp(&timestamp_or_epoch(b.diterima_at))
            }
            SortField::Disposition => collate(
                a.isi_disposisi.as_deref().unwrap_or(""),
                b.isi_disposisi.as_deref().unwrap_or(""),
            ),
        };
        match state.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Dashboard summary counters over a surat listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuratStats {
    pub total: usize,
    pub masuk: usize,
    pub keluar: usize,
    pub bulan_ini: usize,
    pub tanpa_disposisi: usize,
}

pub fn summarize(records: &[Surat], now: DateTime<Utc>) -> SuratStats {
    let mut stats = SuratStats::default();
    for record in records {
        stats.total += 1;
        match record.jenis.as_str() {
            JENIS_MASUK => stats.masuk += 1,
            JENIS_KELUAR => stats.keluar += 1,
            _ => {}
        }
        let received = record.diterima_at.unwrap_or(record.tanggal_surat);
        if received.year() == now.year() && received.month() == now.month() {
            stats.bulan_ini += 1;
        }
        if record.isi_disposisi.is_none() {
            stats.tanpa_disposisi += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn surat(perihal: &str, jenis: &str, diterima_at: Option<DateTime<Utc>>) -> Surat {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        Surat {
            id: Uuid::new_v4(),
            nomor_surat: format!("001/{}", perihal),
            jenis: jenis.to_string(),
            perihal: perihal.to_string(),
            pengirim: "Dinas Pendidikan".to_string(),
            penerima: "Sekretariat".to_string(),
            tanggal_surat: created,
            diterima_at,
            isi_disposisi: None,
            created_at: created,
            updated_at: created,
            deleted_at: None,
        }
    }

    fn subjects(records: &[Surat]) -> Vec<&str> {
        records.iter().map(|s| s.perihal.as_str()).collect()
    }

    #[test]
    fn subject_sort_is_case_insensitive() {
        let mut records = vec![
            surat("Beta", JENIS_MASUK, None),
            surat("alpha", JENIS_MASUK, None),
            surat("Charlie", JENIS_MASUK, None),
        ];
        let state = SortState {
            field: SortField::Subject,
            order: SortOrder::Asc,
        };
        sort_surat(&mut records, state);
        assert_eq!(subjects(&records), vec!["alpha", "Beta", "Charlie"]);
    }

    #[test]
    fn none_keeps_given_order() {
        let mut records = vec![
            surat("zulu", JENIS_MASUK, None),
            surat("alpha", JENIS_MASUK, None),
        ];
        sort_surat(&mut records, SortState::default());
        assert_eq!(subjects(&records), vec!["zulu", "alpha"]);
    }

    #[test]
    fn selecting_none_resets_order() {
        let mut state = SortState::default();
        state.select(SortField::Subject);
        state.select(SortField::Subject);
        assert_eq!(state.order, SortOrder::Desc);
        state.select(SortField::None);
        assert_eq!(state.field, SortField::None);
        assert_eq!(state.order, SortOrder::Asc);
    }

    #[test]
    fn clicking_active_field_toggles_order() {
        let mut state = SortState::default();
        state.select(SortField::Sender);
        assert_eq!(state.order, SortOrder::Asc);
        state.select(SortField::Sender);
        assert_eq!(state.order, SortOrder::Desc);
        state.select(SortField::Sender);
        assert_eq!(state.order, SortOrder::Asc);
    }

    #[test]
    fn switching_field_resets_to_ascending() {
        let mut state = SortState::default();
        state.select(SortField::Sender);
        state.select(SortField::Sender);
        assert_eq!(state.order, SortOrder::Desc);
        state.select(SortField::Subject);
        assert_eq!(state.field, SortField::Subject);
        assert_eq!(state.order, SortOrder::Asc);
    }

    #[test]
    fn missing_received_time_sorts_earliest() {
        let late = Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        let mut records = vec![
            surat("with-time", JENIS_MASUK, Some(late)),
            surat("no-time", JENIS_MASUK, None),
        ];
        let state = SortState {
            field: SortField::ReceivedAt,
            order: SortOrder::Asc,
        };
        sort_surat(&mut records, state);
        assert_eq!(subjects(&records), vec!["no-time", "with-time"]);
    }

    #[test]
    fn descending_reverses_ordering() {
        let mut records = vec![
            surat("alpha", JENIS_MASUK, None),
            surat("Beta", JENIS_MASUK, None),
        ];
        let state = SortState {
            field: SortField::Subject,
            order: SortOrder::Desc,
        };
        sort_surat(&mut records, state);
        assert_eq!(subjects(&records), vec!["Beta", "alpha"]);
    }

    #[test]
    fn summary_counts_directions_and_month() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let last_month = Utc.with_ymd_and_hms(2024, 2, 20, 12, 0, 0).unwrap();
        let mut with_disposisi = surat("rapat", JENIS_KELUAR, Some(last_month));
        with_disposisi.isi_disposisi = Some("teruskan ke bagian umum".to_string());

        let records = vec![
            surat("undangan", JENIS_MASUK, Some(now)),
            surat("laporan", JENIS_MASUK, None),
            with_disposisi,
        ];
        let stats = summarize(&records, now);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.masuk, 2);
        assert_eq!(stats.keluar, 1);
        // "laporan" falls back to tanggal_surat (March), "rapat" was February
        assert_eq!(stats.bulan_ini, 2);
        assert_eq!(stats.tanpa_disposisi, 2);
    }
}
