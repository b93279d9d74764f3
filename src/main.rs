mod app;
mod cli;
mod config;
mod error;
mod git;
mod mask;
mod openai;
mod sanitize;

use clap::Parser;
use colored::Colorize;

use app::App;
use cli::Cli;
use error::AppError;

fn main() {
    let cli = Cli::parse();

    let mut app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run(&cli) {
        match e {
            // ステージ済みの変更なしは正常終了
            AppError::NoStagedChanges => {
                println!("{}", e);
                std::process::exit(0);
            }
            // キャンセルはメッセージ表示済みのため正常終了のみ
            AppError::UserCancelled => std::process::exit(0),
            _ => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
        }
    }
}
