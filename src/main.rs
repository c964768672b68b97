use clap::Parser;
use job_scout::filter::RecordFilter;
use job_scout::{JobSearch, SearchRequest, commands};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

mod args;
use args::{Args, Command, convert_backend, convert_filter};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let mut search = JobSearch::new();
    if let Some(path) = &args.config {
        search = match search.with_config_file(path) {
            Ok(search) => search,
            Err(e) => {
                ::log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        };
    }
    if let Some(path) = args.store {
        search = search.with_store_path(path);
    }

    match args.command {
        Command::Search {
            keywords,
            location,
            count,
            backend,
            page_size,
            delay_ms,
        } => {
            if let Some(backend) = backend {
                search = search.with_backend(convert_backend(backend));
            }
            if let Some(page_size) = page_size {
                search = search.with_page_size(page_size);
            }
            if let Some(delay_ms) = delay_ms {
                search = search.with_politeness_delay(delay_ms);
            }

            let request = match SearchRequest::new(&keywords, location.as_deref(), count) {
                Ok(request) => request,
                Err(e) => {
                    ::log::error!("{}", e);
                    return ExitCode::FAILURE;
                }
            };

            // Ctrl-C stops the search at the next page boundary
            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    ::log::info!("Interrupted, stopping after the current page");
                    on_interrupt.cancel();
                }
            });

            let start_time = std::time::Instant::now();
            match search.search_with_cancel(&request, &cancel).await {
                Ok(report) => {
                    ::log::info!(
                        "Search finished in {:.2} seconds",
                        start_time.elapsed().as_secs_f64()
                    );
                    println!("{}", commands::search_summary(&report.records));
                }
                Err(e) => {
                    ::log::error!("Search failed: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
        Command::List => {
            let records = commands::list_jobs(&*search.store());
            println!("{}", commands::list_summary(&records));
        }
        Command::Filter {
            location,
            include_title,
            exclude_title,
        } => {
            let filter =
                match RecordFilter::new(convert_filter(&location, include_title, exclude_title)) {
                    Ok(filter) => filter,
                    Err(e) => {
                        ::log::error!("Invalid title pattern: {}", e);
                        return ExitCode::FAILURE;
                    }
                };

            match commands::filter_jobs(&*search.store(), &filter) {
                Some(filtered) => {
                    println!("{}", commands::filter_summary(&location, &filtered))
                }
                None => println!("{}", commands::empty_store_summary()),
            }
        }
    }

    ExitCode::SUCCESS
}
