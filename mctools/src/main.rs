use clap::Parser;

mod command_def;
mod command_handler;
mod edits;
mod formatting;
mod profile_manager;

use command_def::Command;
use command_handler::handle_command;

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Command-line tools for MerchantConnect merchants")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    if let Err(e) = handle_command(cli.command).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::command_def::ProductsCommand;

    #[test]
    fn extract_flags() {
        let args = [
            "mctools", "extract", "lot.pdf", "--set", "0:name=Tote", "--exclude", "1:2", "--primary", "1:0", "--remove",
            "3", "--submit",
        ];
        let cli = Arguments::try_parse_from(args).unwrap();
        let Command::Extract(params) = cli.command else { panic!("expected extract") };
        assert_eq!(params.file.to_str(), Some("lot.pdf"));
        assert_eq!(params.set.len(), 1);
        assert_eq!((params.exclude[0].draft, params.exclude[0].image), (1, 2));
        assert_eq!(params.primary[0].image, 0);
        assert_eq!(params.remove, vec![3]);
        assert!(params.submit && !params.yes);
        assert!(Arguments::try_parse_from(["mctools", "extract", "lot.pdf", "--exclude", "1"]).is_err());
    }

    #[test]
    fn show_flags() {
        let args = ["mctools", "products", "show", "7", "--select", "color=Blue", "-s", "size=M", "--image", "1"];
        let cli = Arguments::try_parse_from(args).unwrap();
        let Command::Products(ProductsCommand::Show(params)) = cli.command else { panic!("expected products show") };
        assert_eq!(params.id, 7);
        assert_eq!(params.select.len(), 2);
        assert_eq!(params.select[1].value, "M");
        assert_eq!(params.image, Some(1));
    }
}
