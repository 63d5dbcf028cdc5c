//! Selector property-based tests
//!
//! The visible options must always mirror the record snapshot filtered by the
//! current building and floor.

use palme_forms::{
	ApartmentRecord, ApartmentRecords, ApartmentSelector, FloorValue, HtmlSelectorView,
	SelectOption,
};
use proptest::prelude::*;
use rstest::*;

fn floor_value() -> impl Strategy<Value = FloorValue> {
	prop_oneof![
		(1i64..=4).prop_map(FloorValue::Integer),
		(1i64..=4).prop_map(|n| FloorValue::Text(n.to_string())),
	]
}

fn record_set() -> impl Strategy<Value = Vec<ApartmentRecord>> {
	prop::collection::vec(
		(prop::sample::select(vec!["b1", "b2", "b3"]), floor_value(), "[A-D]"),
		0..24,
	)
	.prop_map(|rows| {
		rows.into_iter()
			.enumerate()
			.map(|(i, (building, floor, number))| ApartmentRecord {
				id: format!("apt-{i}"),
				building_id: building.to_string(),
				floor,
				number,
				building_number: building.trim_start_matches('b').to_string(),
			})
			.collect()
	})
}

proptest! {
	/// Test: option set equals the filtered snapshot
	///
	/// Category: Property
	/// Verifies that, with both selections set, the listed apartments are
	/// exactly the matching records in snapshot order.
	#[rstest]
	fn prop_options_match_filtered_records(
		rows in record_set(),
		building in prop::sample::select(vec!["b1", "b2", "b3", "b9"]),
		floor in 1i64..=5,
	) {
		let floor_text = floor.to_string();
		let expected: Vec<SelectOption> = rows
			.iter()
			.filter(|r| r.building_id == building && r.floor.as_number() == Some(floor as f64))
			.map(|r| SelectOption::apartment(r.id.clone(), format!("Apartamento {}", r.number)))
			.collect();
		let mut selector = ApartmentSelector::new(ApartmentRecords::new(rows), HtmlSelectorView::new());

		selector.select_building(building);
		selector.select_floor(floor_text);
		let options = selector.visible_options();

		if expected.is_empty() {
			prop_assert_eq!(options, vec![SelectOption::unavailable("no apartments available")]);
		} else {
			prop_assert_eq!(&options[0], &SelectOption::placeholder("select an apartment"));
			prop_assert_eq!(&options[1..], expected.as_slice());
		}
	}

	/// Test: unset selection keeps the placeholder
	///
	/// Category: Property
	/// Verifies that no filtering happens while either selection is empty.
	#[rstest]
	fn prop_unset_selection_shows_placeholder_only(
		rows in record_set(),
		building_set in any::<bool>(),
	) {
		let mut selector = ApartmentSelector::new(ApartmentRecords::new(rows), HtmlSelectorView::new());

		if building_set {
			selector.select_building("b1");
		} else {
			selector.select_floor("1");
		}

		prop_assert_eq!(
			selector.visible_options(),
			vec![SelectOption::placeholder("select an apartment")]
		);
	}

	/// Test: info describes the selected record
	///
	/// Category: Property
	/// Verifies that any listed id renders that record's building, floor and number.
	#[rstest]
	fn prop_info_matches_selected_record(rows in record_set(), pick in any::<prop::sample::Index>()) {
		prop_assume!(!rows.is_empty());
		let record = rows[pick.index(rows.len())].clone();
		let mut selector = ApartmentSelector::new(ApartmentRecords::new(rows), HtmlSelectorView::new());

		selector.select_apartment(record.id.clone());
		let info = selector.info().cloned();

		prop_assert!(info.is_some());
		let info = info.unwrap();
		prop_assert_eq!(info.building_number, record.building_number);
		prop_assert_eq!(info.floor, record.floor.to_string());
		prop_assert_eq!(info.number, record.number);
	}
}
