//! Sample data for development and demonstrations

use crate::directory::Directory;
use crate::models::{NewResident, ResidentKind};

const SAMPLE_NAMES: &[&str] = &[
	"Juan Carlos Pérez García",
	"María González López",
	"Carlos Rodríguez Martín",
	"Ana Fernández Jiménez",
	"Luis Sánchez Moreno",
	"Carmen Torres Ruiz",
	"Miguel Ángel Díaz Vega",
	"Isabel Morales Castro",
	"Francisco Javier Ruiz Navarro",
	"Elena Jiménez Hidalgo",
	"Antonio López Mendoza",
	"Rosa María Vega Ortega",
	"José Manuel Castro Paredes",
	"Teresa Navarro Delgado",
	"Manuel Ortega Herrera",
	"Pilar Herrera Méndez",
	"Javier Méndez Silva",
	"Concepción Silva Vargas",
	"Pedro Vargas Ríos",
	"Lucía Ríos Campos",
];

/// How much sample data to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOptions {
	/// Buildings `1..=buildings`, capped at the highest valid number
	pub buildings: u32,
	/// Upper bound of tenants added next to each owner
	pub max_tenants: usize,
	/// Empty the directory before seeding
	pub clear: bool,
}

impl Default for SeedOptions {
	fn default() -> Self {
		Self {
			buildings: 10,
			max_tenants: 3,
			clear: false,
		}
	}
}

/// What a seeding run created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
	pub buildings: usize,
	pub apartments: usize,
	pub residents: usize,
	/// Records refused by the directory, usually because they already exist
	pub skipped: usize,
}

/// Populate the directory with buildings, two apartments per floor and residents
///
/// Each apartment gets one owner and between zero and `max_tenants` tenants,
/// chosen deterministically. Buildings that already exist are skipped along
/// with their apartments, unless `clear` empties the directory first.
///
/// # Examples
///
/// ```
/// use palme_core::{Directory, SeedOptions, seed_complex};
///
/// let directory = Directory::default();
/// let report = seed_complex(&directory, &SeedOptions { buildings: 2, max_tenants: 0, clear: false });
///
/// assert_eq!(report.buildings, 2);
/// assert_eq!(report.apartments, 2 * 8 * 2);
/// assert_eq!(report.residents, report.apartments);
/// ```
pub fn seed_complex(directory: &Directory, options: &SeedOptions) -> SeedReport {
	let rules = directory.rules().clone();
	let last = options.buildings.min(rules.max_building_number);
	let max_tenants = options
		.max_tenants
		.min(rules.max_residents_per_apartment.saturating_sub(1));
	if options.clear {
		directory.clear();
	}

	let mut report = SeedReport::default();
	let mut names = SAMPLE_NAMES.iter().cycle();

	for number in rules.min_building_number..=last {
		let building = match directory.create_building(number) {
			Ok(building) => building,
			Err(error) => {
				tracing::warn!(number, %error, "skipping building");
				report.skipped += 1;
				continue;
			}
		};
		report.buildings += 1;

		for floor in rules.floors() {
			for door in rules.doors_for(number) {
				let apartment =
					match directory.create_apartment(building.id, floor, format!("{floor}{door}")) {
						Ok(apartment) => apartment,
						Err(error) => {
							tracing::warn!(number, floor, door, %error, "skipping apartment");
							report.skipped += 1;
							continue;
						}
					};
				report.apartments += 1;

				let tenants = if max_tenants == 0 {
					0
				} else {
					report.apartments % (max_tenants + 1)
				};
				let kinds = std::iter::once(ResidentKind::Owner)
					.chain(std::iter::repeat_n(ResidentKind::Tenant, tenants));

				for (kind, name) in kinds.zip(&mut names) {
					match directory.create_resident(NewResident::new(apartment.id, *name, kind)) {
						Ok(_) => report.residents += 1,
						Err(error) => {
							tracing::warn!(apartment = %apartment, %error, "skipping resident");
							report.skipped += 1;
						}
					}
				}
			}
		}
	}

	tracing::info!(
		buildings = report.buildings,
		apartments = report.apartments,
		residents = report.residents,
		skipped = report.skipped,
		"sample data created"
	);
	report
}
