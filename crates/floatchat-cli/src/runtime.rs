// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use floatchat_app::{AssistantReply, FilterState, FloatRecord, PageSize, TableQuery};
use floatchat_assistant::{DelayRange, Responder, SeededSource, Surface};
use floatchat_data::{Dataset, write_export};
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::OffsetDateTime;

use crate::config::Config;

/// Runtime backed by the built-in fixture dataset and the canned responders.
pub struct FixtureRuntime {
    dataset: Dataset,
    quick: Responder,
    page: Responder,
    side: Responder,
    delays: DelayRange,
    export_dir: PathBuf,
    filters: FilterState,
    page_size: PageSize,
}

impl FixtureRuntime {
    pub fn from_config(config: &Config) -> Result<Self> {
        let seed = config.reply_seed();
        let offset = |step: u64| seed.map(|value| value.wrapping_add(step));
        Ok(Self {
            dataset: Dataset::builtin(),
            quick: Responder::new(
                Surface::QuickPanel,
                Box::new(SeededSource::from_config(seed)),
            ),
            page: Responder::new(
                Surface::AssistantPage,
                Box::new(SeededSource::from_config(offset(1))),
            ),
            side: Responder::new(
                Surface::SidePanel,
                Box::new(SeededSource::from_config(offset(2))),
            ),
            delays: config.reply_delays()?,
            export_dir: config.export_dir(),
            filters: config.startup_filters()?,
            page_size: config.page_size()?,
        })
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    fn responder(&self, surface: Surface) -> &Responder {
        match surface {
            Surface::QuickPanel => &self.quick,
            Surface::AssistantPage => &self.page,
            Surface::SidePanel => &self.side,
        }
    }

    fn responder_mut(&mut self, surface: Surface) -> &mut Responder {
        match surface {
            Surface::QuickPanel => &mut self.quick,
            Surface::AssistantPage => &mut self.page,
            Surface::SidePanel => &mut self.side,
        }
    }

    /// One-shot question against the assistant page, without the delay.
    /// Blank input gets no reply.
    pub fn ask(&mut self, query: &str) -> Option<AssistantReply> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        Some(self.page.reply(query))
    }

    /// Write every row the table would show under the startup filters.
    pub fn export_default(&mut self) -> Result<PathBuf> {
        let query = TableQuery {
            page_size: self.page_size,
            ..TableQuery::default()
        };
        let result = query.run(self.dataset.floats(), &self.filters);
        write_export(&self.export_dir, today(), &result.filtered)
    }
}

fn today() -> time::Date {
    OffsetDateTime::now_utc().date()
}

impl floatchat_tui::AppRuntime for FixtureRuntime {
    fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn startup_filters(&self) -> FilterState {
        self.filters.clone()
    }

    fn page_size(&self) -> PageSize {
        self.page_size
    }

    fn greeting(&self, surface: Surface) -> AssistantReply {
        self.responder(surface).greeting()
    }

    fn reply(&mut self, surface: Surface, query: &str) -> AssistantReply {
        self.responder_mut(surface).reply(query)
    }

    fn reply_delay(&mut self, surface: Surface) -> Duration {
        let delays = self.delays;
        self.responder_mut(surface).delay(delays)
    }

    fn suggest_completions(&self, surface: Surface, input: &str) -> Vec<String> {
        self.responder(surface)
            .suggest_completions(input)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    fn export_rows(&mut self, rows: &[FloatRecord]) -> Result<PathBuf> {
        write_export(&self.export_dir, today(), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::FixtureRuntime;
    use crate::config::Config;
    use anyhow::Result;
    use floatchat_app::PageSize;
    use floatchat_assistant::Surface;
    use floatchat_testkit::temp_export_dir;
    use floatchat_tui::AppRuntime;
    use std::time::Duration;

    fn config_with(export_dir: &std::path::Path, extra: &str) -> Result<Config> {
        let raw = format!(
            "version = 1\n[assistant]\nmin_delay = \"0ms\"\nmax_delay = \"0ms\"\nseed = 7\n[export]\ndir = {:?}\n{extra}",
            export_dir.display().to_string()
        );
        let value: toml::Value = toml::from_str(&raw)?;
        Ok(value.try_into()?)
    }

    #[test]
    fn seeded_runtimes_reply_identically() -> Result<()> {
        let (_temp, dir) = temp_export_dir()?;
        let config = config_with(&dir, "")?;
        let mut first = FixtureRuntime::from_config(&config)?;
        let mut second = FixtureRuntime::from_config(&config)?;
        for query in ["hello", "anything else", "qc report"] {
            assert_eq!(first.ask(query), second.ask(query));
        }
        Ok(())
    }

    #[test]
    fn blank_question_gets_no_reply() -> Result<()> {
        let (_temp, dir) = temp_export_dir()?;
        let mut runtime = FixtureRuntime::from_config(&config_with(&dir, "")?)?;
        assert_eq!(runtime.ask(""), None);
        assert_eq!(runtime.ask("   \t"), None);
        assert!(runtime.ask("  qc report  ").is_some());
        Ok(())
    }

    #[test]
    fn each_surface_has_its_own_greeting() -> Result<()> {
        let (_temp, dir) = temp_export_dir()?;
        let runtime = FixtureRuntime::from_config(&config_with(&dir, "")?)?;
        assert!(
            runtime
                .greeting(Surface::AssistantPage)
                .content
                .starts_with("🌊 **Welcome to Floatchat AI!**")
        );
        assert!(
            runtime
                .greeting(Surface::SidePanel)
                .content
                .starts_with("Welcome to Floatchat!")
        );
        assert!(
            runtime
                .greeting(Surface::QuickPanel)
                .suggestions
                .is_empty()
        );
        Ok(())
    }

    #[test]
    fn zero_delay_config_yields_zero_delay() -> Result<()> {
        let (_temp, dir) = temp_export_dir()?;
        let mut runtime = FixtureRuntime::from_config(&config_with(&dir, "")?)?;
        assert_eq!(runtime.reply_delay(Surface::QuickPanel), Duration::ZERO);
        Ok(())
    }

    #[test]
    fn completions_come_from_the_surface() -> Result<()> {
        let (_temp, dir) = temp_export_dir()?;
        let runtime = FixtureRuntime::from_config(&config_with(&dir, "")?)?;
        assert_eq!(
            runtime.suggest_completions(Surface::AssistantPage, "oxygen"),
            vec!["Analyze oxygen levels in the Southern Ocean".to_owned()]
        );
        Ok(())
    }

    #[test]
    fn export_default_honors_startup_filters() -> Result<()> {
        let (_temp, dir) = temp_export_dir()?;
        let mut runtime = FixtureRuntime::from_config(&config_with(&dir, "")?)?;
        let everything = runtime.export_default()?;
        assert!(everything.starts_with(runtime.export_dir()));
        let text = std::fs::read_to_string(&everything)?;
        let all_rows = text.lines().count() - 1;
        assert_eq!(all_rows, runtime.dataset().floats().len());

        let (_bgc_temp, bgc_dir) = temp_export_dir()?;
        let config = config_with(&bgc_dir, "[filters]\nbgc_only = true\n[table]\npage_size = 5\n")?;
        let mut bgc = FixtureRuntime::from_config(&config)?;
        assert_eq!(bgc.page_size(), PageSize::Five);
        let text = std::fs::read_to_string(bgc.export_default()?)?;
        let bgc_rows = text.lines().count() - 1;
        assert!(bgc_rows < all_rows);
        assert!(bgc_rows > 0);
        Ok(())
    }
}
