use super::*;
use crate::{Error, FixedDate, SeededRandom, SynthConfig, UsedPhrases, is_valid};
use std::{fs, path::PathBuf};
use tempfile::TempDir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    fn with_ledger(contents: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        if !contents.is_empty() {
            fs::write(&path, contents).unwrap();
        }
        Self { _dir: dir, path }
    }

    fn supply(
        &self,
        today: NaiveDate,
        config: SupplyConfig,
    ) -> PhraseSupply<SeededRandom, FixedDate> {
        PhraseSupply::new(
            Ledger::new(&self.path),
            Lexicon::embedded().unwrap(),
            SeededRandom::new(7),
            FixedDate(today),
            config,
        )
        .unwrap()
    }

    fn contents(&self) -> String {
        fs::read_to_string(&self.path).unwrap_or_default()
    }
}

#[test]
fn tops_up_after_latest_date() {
    let fixture = Fixture::with_ledger("2025-07-31, top shelf\n");
    let config = SupplyConfig::default()
        .with_min_days_ahead(2)
        .with_batch_size(3);
    let supply = fixture.supply(day(2025, 7, 31), config);

    let report = supply.ensure_supply().unwrap();
    assert_eq!(report.future_before, 0);
    assert_eq!(report.requested, 3);
    assert_eq!(report.future_after, 3);
    assert_eq!(report.shortfall(), 0);

    let dates: Vec<_> = report.added.iter().map(|r| r.date).collect();
    assert_eq!(dates, [day(2025, 8, 1), day(2025, 8, 2), day(2025, 8, 3)]);

    let mut used: UsedPhrases = ["top shelf"].into_iter().collect();
    for record in &report.added {
        assert!(is_valid(&record.phrase, &used), "{record}");
        used.insert(&record.phrase);
    }

    let contents = fixture.contents();
    assert!(contents.starts_with("2025-07-31, top shelf\n2025-08-01, "));
    assert_eq!(contents.lines().count(), 4);
}

#[test]
fn second_check_is_a_noop() {
    let fixture = Fixture::with_ledger("2025-07-31, top shelf\n");
    let supply = fixture.supply(day(2025, 7, 31), SupplyConfig::default());

    assert_eq!(supply.run_supply_check().unwrap(), 30);
    let before = fixture.contents();

    let report = supply.ensure_supply().unwrap();
    assert!(report.is_noop());
    assert_eq!(report.future_before, 30);
    assert_eq!(fixture.contents(), before);
}

#[test]
fn empty_ledger_starts_tomorrow() {
    let fixture = Fixture::with_ledger("");
    let supply = fixture.supply(day(2025, 7, 31), SupplyConfig::default().with_batch_size(5));

    assert_eq!(supply.count_future().unwrap(), 0);
    let report = supply.ensure_supply().unwrap();
    assert_eq!(report.added.len(), 5);
    assert_eq!(report.added[0].date, day(2025, 8, 1));
    assert_eq!(report.added[4].date, day(2025, 8, 5));
    assert_eq!(supply.count_future().unwrap(), 5);
}

#[test]
fn stale_ledger_never_backfills_the_past() {
    let fixture = Fixture::with_ledger("2025-07-01, donut shop\n");
    let supply = fixture.supply(day(2025, 7, 31), SupplyConfig::default().with_batch_size(2));

    let report = supply.ensure_supply().unwrap();
    let dates: Vec<_> = report.added.iter().map(|r| r.date).collect();
    assert_eq!(dates, [day(2025, 8, 1), day(2025, 8, 2)]);
}

#[test]
fn partial_supply_is_extended() {
    let fixture = Fixture::with_ledger(
        "2025-07-31, top shelf\n2025-08-01, donut shop\n2025-08-02, open world\n",
    );
    let config = SupplyConfig::default()
        .with_min_days_ahead(7)
        .with_batch_size(4);
    let supply = fixture.supply(day(2025, 7, 31), config);

    let report = supply.ensure_supply().unwrap();
    assert_eq!(report.future_before, 2);
    assert_eq!(report.added[0].date, day(2025, 8, 3));
    assert_eq!(report.future_after, 6);

    // Still below the minimum, so the next check tops up again.
    let report = supply.ensure_supply().unwrap();
    assert_eq!(report.added[0].date, day(2025, 8, 7));
    assert_eq!(report.future_after, 10);
}

#[test]
fn generate_continues_from_future_epoch_when_empty() {
    let fixture = Fixture::with_ledger("");
    let config = SupplyConfig::default().with_epoch(Some(day(2025, 9, 10)));
    let supply = fixture.supply(day(2025, 9, 1), config);

    let report = supply.generate(2).unwrap();
    assert_eq!(report.added[0].date, day(2025, 9, 11));
    assert_eq!(report.added[1].date, day(2025, 9, 12));
    assert_eq!(report.future_after, 2);
}

#[test]
fn generate_on_stale_ledger_starts_tomorrow() {
    let fixture = Fixture::with_ledger("2025-07-31, top shelf\n");
    let config = SupplyConfig::default().with_epoch(Some(day(2025, 7, 1)));
    let supply = fixture.supply(day(2026, 10, 19), config);

    let report = supply.generate(30).unwrap();
    assert_eq!(report.added[0].date, day(2026, 10, 20));
    assert_eq!(report.added[29].date, day(2026, 11, 18));
    assert_eq!(report.future_before, 0);
    assert_eq!(report.future_after, 30);
}

#[test]
fn generate_ignores_supply_level() {
    let fixture = Fixture::with_ledger("2025-07-31, top shelf\n");
    let supply = fixture.supply(day(2025, 7, 1), SupplyConfig::default().with_min_days_ahead(0));

    assert!(supply.ensure_supply().unwrap().is_noop());
    let report = supply.generate(3).unwrap();
    assert_eq!(report.added.len(), 3);
    assert_eq!(report.added[0].date, day(2025, 8, 1));
}

#[test]
fn submit_validates_phrase() {
    let fixture = Fixture::with_ledger("2025-07-31, top shelf\n");
    let supply = fixture.supply(day(2025, 7, 31), SupplyConfig::default());

    assert!(matches!(
        supply.submit("hello", None),
        Err(Error::Rejected(Rejection::WrongLength { length: 5 }))
    ));
    assert!(matches!(
        supply.submit("top-shelf!", None),
        Err(Error::Rejected(Rejection::DisallowedCharacter {
            character: '-',
            position: 3
        }))
    ));
    assert!(matches!(
        supply.submit("Top Shelf", None),
        Err(Error::Rejected(Rejection::WrongLength { length: 9 }))
    ));

    fs::write(&fixture.path, "2025-07-31, donut shop\n").unwrap();
    assert!(matches!(
        supply.submit("DONUT SHOP", None),
        Err(Error::Rejected(Rejection::Duplicate { .. }))
    ));
    assert_eq!(fixture.contents(), "2025-07-31, donut shop\n");
}

#[test]
fn submit_refuses_surrounding_spaces() {
    let fixture = Fixture::with_ledger("2025-07-31, top shelf\n");
    let supply = fixture.supply(day(2025, 7, 31), SupplyConfig::default());

    for phrase in ["  spaced  ", " spaced   ", "spaced    "] {
        assert!(matches!(
            supply.submit(phrase, None),
            Err(Error::Rejected(Rejection::SurroundingSpace { .. }))
        ));
    }
    assert_eq!(fixture.contents(), "2025-07-31, top shelf\n");

    let record = supply.submit("in spaced1", None).unwrap();
    let snapshot = supply.ledger().load().unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.used().len(), 2);
    assert_eq!(snapshot.records()[1], record);
    assert!(supply.audit().unwrap().repeated_phrases.is_empty());
}

#[test]
fn submit_takes_next_free_date() {
    let fixture = Fixture::with_ledger(
        "2025-07-31, top shelf\n2025-08-01, donut shop\n2025-08-03, open world\n",
    );
    let supply = fixture.supply(day(2025, 7, 31), SupplyConfig::default());

    let record = supply.submit("i love you", None).unwrap();
    assert_eq!(record, PhraseRecord::new(day(2025, 8, 2), "i love you"));
    assert!(fixture.contents().ends_with("2025-08-02, i love you\n"));

    let record = supply.submit("pink cloud", None).unwrap();
    assert_eq!(record.date, day(2025, 8, 4));
}

#[test]
fn submit_with_date() {
    let fixture = Fixture::with_ledger("2025-07-31, top shelf\n");
    let supply = fixture.supply(day(2025, 7, 31), SupplyConfig::default());

    assert!(matches!(
        supply.submit("i love you", Some(day(2025, 7, 31))),
        Err(Error::Rejected(Rejection::DateTaken { .. }))
    ));

    let record = supply.submit("i love you", Some(day(2025, 12, 25))).unwrap();
    assert_eq!(record.date, day(2025, 12, 25));
    assert_eq!(
        supply.phrase_for(day(2025, 12, 25)).unwrap(),
        Some(record)
    );
}

#[test]
fn phrase_for_looks_up_rotation() {
    let fixture = Fixture::with_ledger("2025-07-31, top shelf\n2025-08-01, donut shop\n");
    let supply = fixture.supply(day(2025, 7, 31), SupplyConfig::default());

    assert_eq!(
        supply.phrase_for(day(2025, 8, 1)).unwrap(),
        Some(PhraseRecord::new(day(2025, 8, 1), "donut shop"))
    );
    assert_eq!(supply.phrase_for(day(2025, 8, 2)).unwrap(), None);
}

#[test]
fn generated_ledger_audits_clean() {
    let fixture = Fixture::with_ledger("");
    let supply = fixture.supply(day(2025, 7, 31), SupplyConfig::default().with_batch_size(60));

    supply.ensure_supply().unwrap();
    let audit = supply.audit().unwrap();
    assert_eq!(audit.records, 60);
    assert!(audit.is_clean(), "{audit:?}");
}

#[test]
fn rejects_invalid_config() {
    let fixture = Fixture::with_ledger("");
    let build = |config| {
        PhraseSupply::new(
            Ledger::new(&fixture.path),
            Lexicon::default(),
            SeededRandom::new(1),
            FixedDate(day(2025, 7, 31)),
            config,
        )
    };

    assert!(matches!(
        build(SupplyConfig::default().with_batch_size(0)),
        Err(Error::InvalidConfig { .. })
    ));
    assert!(matches!(
        build(SupplyConfig::default().with_synth(SynthConfig::default().with_max_attempts(0))),
        Err(Error::InvalidConfig { .. })
    ));
}

#[test]
fn empty_lexicon_still_fills_with_pseudo_words() {
    let fixture = Fixture::with_ledger("");
    let supply = PhraseSupply::new(
        Ledger::new(&fixture.path),
        Lexicon::default(),
        SeededRandom::new(3),
        FixedDate(day(2025, 7, 31)),
        SupplyConfig::default().with_batch_size(5),
    )
    .unwrap();

    let report = supply.ensure_supply().unwrap();
    assert_eq!(report.added.len(), 5);
    assert!(report.added.iter().all(|r| r.phrase.len() == 10));
}

#[cfg(feature = "serde")]
#[test]
fn report_serializes() {
    let fixture = Fixture::with_ledger("2025-07-31, top shelf\n");
    let supply = fixture.supply(day(2025, 7, 31), SupplyConfig::default().with_batch_size(1));

    let report = supply.ensure_supply().unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["today"], "2025-07-31");
    assert_eq!(json["added"][0]["date"], "2025-08-01");
}
