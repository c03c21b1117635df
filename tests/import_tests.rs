mod common;

use fundraising_core::{core::services::ImportService, errors::LedgerError};

#[test]
fn csv_row_becomes_pledge() {
    let text = "Name,Department,Amount\nName,Dept,100\n";
    let parsed = ImportService::parse_csv_pledges(text, "Guests");
    assert_eq!(parsed.pledges.len(), 1);
    assert!(parsed.skipped.is_empty());
    let pledge = &parsed.pledges[0];
    assert_eq!(pledge.name, "Name");
    assert_eq!(pledge.department, "Dept");
    assert_eq!(pledge.amount, 100.0);
}

#[test]
fn csv_row_without_name_is_skipped() {
    let text = "name,department,amount\n,Dept,100\n";
    let parsed = ImportService::parse_csv_pledges(text, "Guests");
    assert!(parsed.pledges.is_empty());
    assert!(matches!(
        parsed.skipped.as_slice(),
        [LedgerError::MalformedCsvLine { line: 2, .. }]
    ));
}

#[test]
fn csv_fills_blank_department_and_bad_amounts() {
    let text = "name,department,amount\n\
                Ann,,250\n\
                Ben,Youth,lots\n\
                \"Otieno, Peter\",Eagles,\"1,000\"\n\
                Carol,Youth\n";
    let parsed = ImportService::parse_csv_pledges(text, "Guests");

    let names: Vec<_> = parsed.pledges.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Ben", "Otieno, Peter"]);
    assert_eq!(parsed.pledges[0].department, "Guests");
    assert_eq!(parsed.pledges[1].amount, 0.0);
    assert_eq!(parsed.pledges[2].department, "Eagles");
    assert_eq!(parsed.skipped.len(), 1);
}

#[test]
fn csv_import_assigns_ids_and_persists_once() {
    let base = common::temp_base();
    let mut store = common::file_store(&base);
    let saves = std::rc::Rc::new(std::cell::Cell::new(0));
    let counter = saves.clone();
    store.subscribe(move |_| counter.set(counter.get() + 1));

    let text = "name,department,amount\nAnn,Eagles,100\nBen,Youth,200\n,Youth,5\n";
    let report = ImportService::import_csv_pledges(&mut store, text, "Guests").unwrap();

    assert_eq!((report.imported, report.skipped), (2, 1));
    assert_eq!(saves.get(), 1);
    let ids: Vec<_> = store
        .document()
        .pledges
        .iter()
        .map(|p| p.id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["rec-1", "rec-2"]);
    assert_eq!(common::file_store(&base).document().pledges.len(), 2);
}

#[test]
fn broken_csv_line_does_not_drop_later_pledges() {
    let base = common::temp_base();
    let mut store = common::file_store(&base);
    let text = "name,department,amount\n\
                \"Ann,Eagles,100\n\
                Ben,Youth,100 KES\n\
                Cara,Youth,250.50/=\n";

    let report = ImportService::import_csv_pledges(&mut store, text, "Guests").unwrap();

    assert_eq!((report.imported, report.skipped), (2, 1));
    let saved: Vec<_> = common::file_store(&base)
        .document()
        .pledges
        .iter()
        .map(|p| (p.name.clone(), p.amount))
        .collect();
    assert_eq!(
        saved,
        vec![("Ben".to_string(), 100.0), ("Cara".to_string(), 250.5)]
    );
}
