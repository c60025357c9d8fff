use super::*;

const HEADER: &str = "Year,Country of Origin,Country of Origin ISO,Country of Asylum,Country of Asylum ISO,Refugees,Asylum-seekers,Other people in need of international protection";

fn table(rows: &[&str]) -> Table {
    let mut s = String::from(HEADER);
    for r in rows {
        s.push('\n');
        s.push_str(r);
    }
    Table::from_csv_str(&s).unwrap()
}

fn rec(year: i32, dest: &str, value: f64) -> FlowRecord {
    FlowRecord {
        year,
        origin_code: "YEM".to_owned(),
        dest_code: dest.to_owned(),
        dest_name: dest.to_owned(),
        value,
    }
}

#[test]
fn value_sums_three_columns_with_missing_as_zero() {
    let t = table(&[
        "2015,Yemen,YEM,Saudi Arabia,SAU,100,50,25",
        "2015,Yemen,YEM,Oman,OMN,10,,x",
    ]);
    let ds = normalize_flows(&t, &FlowMapConfig::default());
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.records()[0].value, 175.0);
    assert_eq!(ds.records()[0].dest_name, "Saudi Arabia");
    assert_eq!(ds.records()[1].value, 10.0);
}

#[test]
fn excludes_other_origins_internal_moves_and_empty_rows() {
    let t = table(&[
        "2015,Syria,SYR,Turkey,TUR,1000,0,0",
        "2015,Yemen,YEM,Yemen,YEM,1000,0,0",
        "2015,Yemen,YEM,Oman,OMN,0,0,0",
        "2015,Yemen,YEM,Oman,OMN,-5,0,0",
        "2015,Yemen,YEM,Djibouti,DJI,3,0,0",
    ]);
    let ds = normalize_flows(&t, &FlowMapConfig::default());
    assert_eq!(ds.len(), 1);
    let r = &ds.records()[0];
    assert_eq!(r.dest_code, "DJI");
    assert!(r.value > 0.0);
    assert_ne!(r.dest_code, "YEM");
}

#[test]
fn years_before_cutoff_and_unparsable_years_are_dropped() {
    let t = table(&[
        "2011,Yemen,YEM,Oman,OMN,1000,0,0",
        "????,Yemen,YEM,Oman,OMN,1000,0,0",
        "2012,Yemen,YEM,Oman,OMN,1000,0,0",
        "2020,Yemen,YEM,Egypt,EGY,1000,0,0",
    ]);
    let ds = normalize_flows(&t, &FlowMapConfig::default());
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.year_range(), Some((2012, 2020)));
}

#[test]
fn repeated_destination_in_a_year_merges_into_one_record() {
    let t = table(&[
        "2015,Yemen,YEM,Saudi Arabia,SAU,400,0,0",
        "2015,Yemen,YEM,Djibouti,DJI,900,0,0",
        "2015,Yemen,YEM,Saudi Arabia (KSA),SAU,300,0,5",
        "2016,Yemen,YEM,Saudi Arabia,SAU,50,0,0",
    ]);
    let ds = normalize_flows(&t, &FlowMapConfig::default());
    assert_eq!(ds.len(), 3);
    let sau = &ds.records()[0];
    assert_eq!((sau.year, sau.dest_code.as_str()), (2015, "SAU"));
    assert_eq!(sau.value, 705.0);
    assert_eq!(sau.dest_name, "Saudi Arabia");
    assert_eq!(ds.year_total(2015), 1605.0);

    // Neither row alone clears the threshold; merged they do, once.
    let frame = ds.frame_set(2015, 500.0, 30);
    let codes: Vec<_> = frame.iter().map(|r| r.dest_code.as_str()).collect();
    assert_eq!(codes, ["DJI", "SAU"]);
}

#[test]
fn empty_dataset_has_no_year_range() {
    let ds = normalize_flows(&table(&[]), &FlowMapConfig::default());
    assert!(ds.is_empty());
    assert_eq!(ds.year_range(), None);
}

#[test]
fn frame_set_is_thresholded_sorted_and_capped() {
    let mut records = Vec::new();
    for i in 0..50 {
        records.push(rec(2015, &format!("D{i:02}"), 100.0 + 37.0 * f64::from(i)));
    }
    records.push(rec(2016, "SAU", 99_999.0));
    let ds = FlowDataset::new(records);

    let frame = ds.frame_set(2015, 500.0, 30);
    assert_eq!(frame.len(), 30);
    assert!(frame.iter().all(|r| r.value > 500.0 && r.year == 2015));
    for w in frame.windows(2) {
        assert!(w[0].value > w[1].value);
    }
    assert_eq!(frame[0].dest_code, "D49");
}

#[test]
fn frame_set_threshold_is_exclusive() {
    let ds = FlowDataset::new(vec![rec(2015, "SAU", 500.0), rec(2015, "OMN", 501.0)]);
    let frame = ds.frame_set(2015, 500.0, 30);
    assert_eq!(frame.len(), 1);
    assert_eq!(frame[0].dest_code, "OMN");
    assert!(ds.frame_set(2016, 500.0, 30).is_empty());
}

#[test]
fn year_total_ignores_threshold() {
    let ds = FlowDataset::new(vec![
        rec(2015, "SAU", 2000.0),
        rec(2015, "OMN", 10.0),
        rec(2016, "EGY", 700.0),
    ]);
    assert_eq!(ds.year_total(2015), 2010.0);
    assert_eq!(ds.year_total(2017), 0.0);
}
