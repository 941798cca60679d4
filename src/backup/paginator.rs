//! Paginated fetch-and-persist loop.

use std::time::Instant;

use crate::api::{Fetched, TwitterApi};
use crate::backup::endpoint::{Advance, Endpoint};
use crate::backup::media::MediaFetcher;
use crate::backup::pacer::Pacer;
use crate::backup::state::{RunState, StopReason};
use crate::config::{Config, MediaErrorPolicy, RunMode, MAX_PAGE_SIZE};
use crate::error::Result;
use crate::item::BackupItem;
use crate::output::{print_info, print_warning};
use crate::store::{persist_item, ItemStore, Persisted};

/// Knobs of a paginator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginatorOptions {
    pub page_size: u32,
    pub run_mode: RunMode,
    pub media_errors: MediaErrorPolicy,
    pub show_progress: bool,
}

impl Default for PaginatorOptions {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            run_mode: RunMode::default(),
            media_errors: MediaErrorPolicy::default(),
            show_progress: true,
        }
    }
}

impl From<&Config> for PaginatorOptions {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.options.page_size.min(MAX_PAGE_SIZE),
            run_mode: config.options.run_mode,
            media_errors: config.options.media_errors,
            show_progress: config.options.show_progress,
        }
    }
}

/// Drives one resource from its first page to its last into one store.
pub struct Paginator<'a, S> {
    api: &'a dyn TwitterApi,
    store: S,
    pacer: Pacer,
    options: PaginatorOptions,
}

impl<'a, S: ItemStore> Paginator<'a, S> {
    pub fn new(api: &'a dyn TwitterApi, store: S, pacer: Pacer, options: PaginatorOptions) -> Self {
        Self {
            api,
            store,
            pacer,
            options,
        }
    }

    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    /// Run until the resource is exhausted or a request fails.
    ///
    /// Failed requests and unexpected statuses end the run normally with the
    /// reason recorded in the returned state. Only persistence failures (and
    /// media transport failures under `MediaErrorPolicy::Abort`) return `Err`.
    pub async fn run<E: Endpoint>(&mut self, endpoint: &E) -> Result<RunState> {
        let started = Instant::now();
        let kind = endpoint.kind();
        let mut state = RunState::new(kind);

        if self.options.run_mode == RunMode::Fresh {
            tracing::debug!(
                "Fresh run for {}: existing items are removed, per-item checks only catch repeats within this run",
                kind
            );
        }
        self.store.prepare(self.options.run_mode)?;

        let media = MediaFetcher::new(self.api, self.options.media_errors);
        let mut token = endpoint.start();

        let stop = loop {
            tracing::debug!("Requesting {} page with {:?}", kind, token);

            let page = match endpoint.fetch(self.api, token, self.options.page_size).await {
                Ok(Fetched::Ok(page)) => page,
                Ok(Fetched::Status(status)) => {
                    print_warning(&format!("unexpected status code {}", status));
                    break StopReason::UnexpectedStatus(status.as_u16());
                }
                Err(e) => {
                    print_warning(&format!("failed to fetch {}: {}", kind, e));
                    break StopReason::Failed(e.to_string());
                }
            };

            let new_items: Vec<&E::Item> = page
                .items
                .iter()
                .filter(|item| !token.repeats(*item))
                .collect();
            if new_items.is_empty() {
                print_info("done");
                break StopReason::Exhausted;
            }

            for item in &new_items {
                self.process_item(&media, *item, &mut state).await?;
            }

            state.add_page(new_items.len());
            print_info(&format!(
                "+ downloaded {} {}, total {}",
                new_items.len(),
                kind.noun(),
                state.total
            ));

            match token.advance(&page) {
                Advance::Next(next) => token = next,
                Advance::Stop(reason) => {
                    if reason == StopReason::Stalled {
                        print_warning(&format!("{} stopped: {}", kind, reason));
                    }
                    break reason;
                }
            }

            self.pacer.pause().await;
        };

        tracing::info!("{} run finished: {}", kind, stop);
        state.stop = Some(stop);
        state.elapsed = started.elapsed();
        Ok(state)
    }

    /// Persist one item and, if it was new, its attachments.
    async fn process_item<T: BackupItem>(
        &self,
        media: &MediaFetcher<'_>,
        item: &T,
        state: &mut RunState,
    ) -> Result<()> {
        state.observe(item.timestamp());

        if persist_item(&self.store, item)? == Persisted::AlreadyPresent {
            state.increment_skipped();
            return Ok(());
        }
        state.increment_saved();

        let attachments = item.attachments();
        if !attachments.is_empty() {
            let outcome = media
                .fetch_all(&self.store, item.id(), &attachments)
                .await?;
            state.assets += outcome.saved;
            state.assets_skipped += outcome.skipped;
        }

        if self.options.show_progress {
            if let Some(line) = item.progress_line() {
                println!("{}", line);
            }
        }

        Ok(())
    }
}
