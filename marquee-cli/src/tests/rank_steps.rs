//! Behaviour-driven step definitions driving the rank CLI scenarios.

use super::helpers::{REGULAR_USER, RankWorkspace, write_utf8};
use super::*;
use crate::ARG_RANK_REQUEST;
use crate::rank::{RankingEntry, run_rank_with};
use camino::Utf8PathBuf;
use marquee_core::test_support::reference_now;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

struct RankWorld {
    workspace: RankWorkspace,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl RankWorld {
    fn new() -> Self {
        Self {
            workspace: RankWorkspace::new(),
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn output_path(&self) -> Utf8PathBuf {
        self.workspace.root.join("reports/today/ranking.json")
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["marquee".to_owned(), "rank".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.workspace.request_path.as_str().to_owned());
        }
        argv.extend([
            format!("--{}", crate::ARG_RANK_EVENTS_DB),
            self.workspace.events_db.as_str().to_owned(),
        ]);
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> RankWorld {
    RankWorld::new()
}

fn parse_ranking(payload: &[u8]) -> Vec<RankingEntry> {
    serde_json::from_slice(payload).expect("output should be a JSON ranking")
}

#[given("an events database exists on disk")]
fn events_database_exists(#[from(world)] world: &RankWorld) {
    world.workspace.write_events_db();
}

#[given("a rank request for a returning visitor exists on disk")]
fn returning_visitor_request(#[from(world)] world: &RankWorld) {
    world
        .workspace
        .write_request(&format!(r#"{{"user_id": {REGULAR_USER}, "hints": {{"budget": "1500"}}}}"#));
}

#[given("I ask for the best event in a nested output file")]
fn ask_for_best_event_in_file(#[from(world)] world: &RankWorld) {
    world.cli_args.borrow_mut().extend([
        format!("--{}", crate::ARG_RANK_LIMIT),
        "1".to_owned(),
        format!("--{}", crate::ARG_RANK_OUTPUT),
        world.output_path().into_string(),
    ]);
}

#[given("I omit the rank request path")]
fn omit_rank_request_path(#[from(world)] world: &RankWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("the rank request contains invalid JSON")]
fn rank_request_contains_invalid_json(#[from(world)] world: &RankWorld) {
    write_utf8(&world.workspace.request_path, b"{ not valid json");
}

#[when("I run the rank command")]
fn run_rank_command(#[from(world)] world: &RankWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Rank(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_rank_with(args, reference_now(), &mut *buffer)
        }
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints the ranking as JSON")]
fn command_succeeds_and_prints_json(#[from(world)] world: &RankWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let ranking = parse_ranking(&world.stdout.borrow());
    let ids: Vec<_> = ranking.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    let top = ranking.first().expect("top entry");
    assert_eq!(top.sub_scores.category, 1.0);
    assert_eq!(top.sub_scores.budget, 1.0);
}

#[then("the output file holds only the best event")]
fn output_file_holds_best_event(#[from(world)] world: &RankWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");
    assert!(world.stdout.borrow().is_empty(), "stdout should stay empty");

    let payload = std::fs::read(world.output_path()).expect("read output file");
    let ranking = parse_ranking(&payload);
    let ids: Vec<_> = ranking.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![1]);
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &RankWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_RANK_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &RankWorld) {
    match &*world.error() {
        CliError::ParseRankRequest { path, .. } => {
            assert_eq!(*path, world.workspace.request_path);
        }
        other => panic!("expected ParseRankRequest, found {other:?}"),
    }
}

macro_rules! register_rank_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/rank_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: RankWorld) {
            let _ = world;
        }
    };
}

register_rank_scenario!(rank_happy_path, "ranking events from a request");
register_rank_scenario!(rank_to_output_file, "writing a limited ranking to an output file");
register_rank_scenario!(rank_missing_request, "rejecting missing request paths");
register_rank_scenario!(rank_invalid_json, "rejecting invalid JSON input");
