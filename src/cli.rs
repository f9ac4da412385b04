// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{arg, crate_version, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON").action(ArgAction::SetTrue))
        .arg(arg!(--jsonl "Print as JSON lines").action(ArgAction::SetTrue))
}

fn type_filter() -> Arg {
    Arg::new("type")
        .long("type")
        .value_name("TYPE")
        .default_value("all")
        .value_parser(["all", "income", "expense"])
        .help("Show only income or expense transactions")
}

fn draft_args(cmd: Command, required: bool) -> Command {
    cmd.arg(arg!(--title <TITLE> "Short label").required(required))
        .arg(arg!(--amount <AMOUNT> "Non-negative amount").required(required))
        .arg(arg!(--date <DATE> "YYYY-MM-DD").required(required))
        .arg(arg!(--category <CATEGORY> "One of `spendboard tx categories`").required(false))
        .arg(
            Arg::new("kind")
                .long("type")
                .value_name("TYPE")
                .value_parser(["income", "expense"])
                .help("income or expense"),
        )
        .arg(arg!(--description <TEXT> "Free text").required(false))
}

pub fn build_cli() -> Command {
    Command::new("spendboard")
        .version(crate_version!())
        .about("Expense tracking dashboard for a remote transactions API")
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("auth")
                .about("Sign in, sign up and sign out")
                .subcommand(
                    Command::new("login")
                        .arg(arg!(--email <EMAIL>).required(true))
                        .arg(arg!(--password <PASSWORD>).required(true)),
                )
                .subcommand(
                    Command::new("register")
                        .arg(arg!(--name <NAME>).required(true))
                        .arg(arg!(--email <EMAIL>).required(true))
                        .arg(arg!(--password <PASSWORD>).required(true)),
                )
                .subcommand(Command::new("logout"))
                .subcommand(Command::new("whoami")),
        )
        .subcommand(
            Command::new("tx")
                .about("List and edit transactions")
                .subcommand(json_flags(Command::new("list").arg(type_filter())))
                .subcommand(draft_args(Command::new("add"), true))
                .subcommand(draft_args(
                    Command::new("edit").arg(arg!(--id <ID>).required(true)),
                    false,
                ))
                .subcommand(Command::new("rm").arg(arg!(--id <ID>).required(true)))
                .subcommand(Command::new("categories").about("List the fixed categories")),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboard views of the current snapshot")
                .subcommand(json_flags(Command::new("summary")))
                .subcommand(json_flags(Command::new("monthly")))
                .subcommand(json_flags(
                    Command::new("categories").arg(
                        arg!(--values "Show amounts instead of percentages")
                            .action(ArgAction::SetTrue),
                    ),
                ))
                .subcommand(json_flags(
                    Command::new("distribution").arg(
                        arg!(--values "Show amounts instead of percentages")
                            .action(ArgAction::SetTrue),
                    ),
                )),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        arg!(--format <FORMAT>)
                            .required(true)
                            .value_parser(["csv", "json"]),
                    )
                    .arg(arg!(--out <PATH>).required(true))
                    .arg(type_filter()),
            ),
        )
        .subcommand(
            Command::new("config")
                .about("Local settings")
                .subcommand(Command::new("set-api").arg(arg!(<URL> "API base URL")))
                .subcommand(Command::new("show")),
        )
        .subcommand(Command::new("doctor").about("Check the snapshot for data problems"))
}
