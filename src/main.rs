use dotenv::dotenv;
use feed_relay::deliver::relay_job::{RelayJob, RunOutcome};
use feed_relay::Config;

fn main() {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let job = RelayJob::new(config);

    match job.execute() {
        Ok(RunOutcome::Posted(identity)) => log::info!("Posted item {}", identity),
        Ok(RunOutcome::Unchanged) => log::info!("The latest item was already posted"),
        Ok(RunOutcome::NothingToPost) => log::info!("No usable item in the feed"),
        Err(error) => {
            log::error!("Failed to relay the feed: {:?}", error);
            std::process::exit(1);
        }
    }
}
