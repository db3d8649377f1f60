use std::io::Read;

use csv::ReaderBuilder;
use mun_entities::{
    mock::{make_mock_directory_with_options, save_mock_directory, MockOption},
    prelude::{committee_slug_for_entry, ConflictKey, ParticipantPatch},
    domain::participant::trimmed,
    DirectoryService,
};
use tracing::info;

use crate::{auth::normalize_email, state::AppState};

#[derive(clap::Subcommand)]
pub enum Command {
    /// Imports a roster CSV with the columns email, full_name, role, committee, country
    ImportParticipants {
        path: String
    },
    /// Fills the directory with fake participants
    SeedMock {
        #[arg(long, default_value_t = 30)]
        count: u32
    }
}

impl Command {
    pub async fn run(&self, app_state: AppState) -> anyhow::Result<()> {
        match self {
            Command::ImportParticipants { path } => {
                let file = std::fs::File::open(path)?;
                let count = import_roster(&app_state.directory(), file).await?;
                info!("Imported {} participants from {}", count, path);
            },
            Command::SeedMock { count } => {
                let profiles = make_mock_directory_with_options(MockOption {
                    num_participants: *count,
                    use_random_names: true,
                    ..Default::default()
                });
                let saved = save_mock_directory(&app_state.directory(), profiles).await?;
                info!("Seeded {} participants", saved.len());
            }
        }
        Ok(())
    }
}

/// Upserts every roster row by email. Rows without an email are skipped.
pub async fn import_roster<D, R>(directory: &D, reader: R) -> anyhow::Result<usize> where D: DirectoryService + ?Sized, R: Read {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::All).flexible(true).from_reader(reader);

    let mut count = 0;
    for record in reader.records() {
        let record = record?;
        let field = |idx: usize| trimmed(record.get(idx).map(|s| s.to_string()));

        let Some(email) = field(0) else {
            continue;
        };

        let patch = ParticipantPatch {
            full_name: Some(field(1)),
            role: Some(field(2).map(|r| r.to_lowercase())),
            committee: Some(committee_slug_for_entry(record.get(3))),
            country: Some(field(4)),
            ..ParticipantPatch::with_email(normalize_email(&email))
        };
        directory.upsert(patch, ConflictKey::Email).await?;
        count += 1;
    }

    Ok(count)
}
