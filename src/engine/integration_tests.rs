// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::json;

use crate::backends::local::LocalUnitFactory;
use crate::backends::stub::{
    CountingUnit, EchoUnit, FailingRouter, FailingUnit, SleepingUnit, StaticRouter, ValueUnit,
};
use crate::config::{ExecutionOptions, PipelineDefinition};
use crate::engine::{execute, PipelineExecutor};
use crate::errors::{ExecutionError, UnitError, ValidationError};
use crate::observability::LogLevel;
use crate::pipeline::{Pipeline, Unit};
use crate::traits::{Record, TransformFn};

/// Integration tests for the pipeline executor using stub and built-in units
#[cfg(test)]
mod tests {
    use super::*;

    fn hello_pipeline() -> Pipeline {
        let source = Unit::transform(
            "source",
            TransformFn::new(|_inputs: Record| async move {
                let mut out = Record::new();
                out.insert("data".into(), json!("hello"));
                Ok(out)
            }),
        );
        let processor = Unit::transform(
            "processor",
            TransformFn::new(|inputs: Record| async move {
                let text = inputs["input"].as_str().unwrap_or_default().to_uppercase();
                let mut out = Record::new();
                out.insert("result".into(), json!(text));
                Ok(out)
            }),
        )
        .with_input("input", "source:str:data");

        Pipeline::define(vec![processor, source]).unwrap()
    }

    fn value(name: &str, value: serde_json::Value) -> Unit {
        Unit::transform(name, ValueUnit::new(value))
    }

    fn capture_logs() -> (ExecutionOptions, Arc<Mutex<Vec<(String, LogLevel)>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();
        let options = ExecutionOptions::default().with_logger(move |message, level| {
            sink.lock().unwrap().push((message.to_string(), level));
        });
        (options, captured)
    }

    #[tokio::test]
    async fn test_hello_pipeline() {
        let result = execute(&hello_pipeline(), ExecutionOptions::default())
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.attempted(), vec!["source", "processor"]);
        assert_eq!(result.outputs["source"]["data"], json!("hello"));
        assert_eq!(result.outputs["processor"]["result"], json!("HELLO"));
    }

    #[tokio::test]
    async fn test_timeout_aborts_run() {
        let pipeline = Pipeline::define(vec![
            value("source", json!(1)),
            Unit::transform("slow", SleepingUnit::millis(1_000)).with_input("v", "source:int:value"),
            Unit::transform("after", EchoUnit).with_input("v", "slow:int:v"),
        ])
        .unwrap();

        let started = Instant::now();
        let result = execute(&pipeline, ExecutionOptions::default().with_unit_timeout_ms(50))
            .await
            .unwrap();

        assert!(!result.success);
        assert!(started.elapsed() < Duration::from_millis(900));
        assert_eq!(result.attempted(), vec!["source", "slow"]);
        assert!(result.outputs.get("slow").is_none());
        match result.error {
            Some(ExecutionError::UnitFailed { unit, source }) => {
                assert_eq!(unit, "slow");
                assert_eq!(
                    source,
                    UnitError::ExecutionTimeout {
                        unit: "slow".into(),
                        timeout_ms: 50
                    }
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fail_fast_stops_scheduling() {
        let counter = CountingUnit::default();
        let pipeline = Pipeline::define(vec![
            Unit::transform("a_broken", FailingUnit::new("boom")),
            Unit::transform("b_later", counter.clone()),
        ])
        .unwrap();

        let result = execute(&pipeline, ExecutionOptions::default()).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.attempted(), vec!["a_broken"]);
        assert_eq!(counter.count(), 0);
    }

    #[tokio::test]
    async fn test_continue_on_error_attempts_everything() {
        let pipeline = Pipeline::define(vec![
            Unit::transform("broken", FailingUnit::new("boom")),
            Unit::transform("dependent", EchoUnit).with_input("x", "broken:str:text"),
            value("independent", json!("ok")),
        ])
        .unwrap();
        let (options, logs) = capture_logs();

        let result = execute(&pipeline, options.with_continue_on_error(true))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.unit_results.len(), 3);
        assert_eq!(result.failed().count(), 2);
        assert_eq!(
            result.unit_result("dependent").and_then(|r| r.error()),
            Some(&UnitError::UnresolvedDependency {
                unit: "dependent".into(),
                input: "x".into(),
                dependency: "broken".into(),
            })
        );
        assert_eq!(result.outputs["independent"]["value"], json!("ok"));

        let logs = logs.lock().unwrap();
        assert!(logs
            .iter()
            .any(|(message, level)| *level == LogLevel::Warn && message.contains("broken")));
    }

    #[tokio::test]
    async fn test_optional_input_omitted_after_failure() {
        let pipeline = Pipeline::define(vec![
            value("source", json!("data")),
            Unit::transform("hint", FailingUnit::new("no hint today")),
            Unit::transform("consumer", EchoUnit)
                .with_input("data", "source:str:value")
                .with_optional_input("hint", "hint:str:value"),
        ])
        .unwrap();

        let result = execute(&pipeline, ExecutionOptions::default().with_continue_on_error(true))
            .await
            .unwrap();

        let consumer = result.output("consumer").unwrap();
        assert_eq!(consumer["data"], json!("data"));
        assert!(!consumer.contains_key("hint"));
    }

    #[tokio::test]
    async fn test_router_runs_selected_branch_only() {
        let path_b = CountingUnit::default();
        let pipeline = Pipeline::define(vec![
            value("source", json!("a")),
            Unit::router("classify", StaticRouter::new(&["pathA"])).with_input("v", "source:str:value"),
            Unit::transform("pathA", EchoUnit).with_input("routes", "classify:list:routes"),
            Unit::transform("pathB", path_b.clone()).with_input("routes", "classify:list:routes"),
        ])
        .unwrap();

        let result = execute(&pipeline, ExecutionOptions::default()).await.unwrap();

        assert!(result.success);
        assert_eq!(result.attempted(), vec!["source", "classify", "pathA"]);
        assert_eq!(result.outputs["classify"]["routes"], json!(["pathA"]));
        assert_eq!(result.outputs["pathA"]["routes"], json!(["pathA"]));
        assert!(result.outputs.get("pathB").is_none());
        assert_eq!(path_b.count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_route_is_logged_and_ignored() {
        let pipeline = Pipeline::define(vec![
            value("source", json!("a")),
            Unit::router("classify", StaticRouter::new(&["ghost", "pathA"]))
                .with_input("v", "source:str:value"),
            Unit::transform("pathA", EchoUnit).with_input("routes", "classify:list:routes"),
        ])
        .unwrap();
        let (options, logs) = capture_logs();

        let result = execute(&pipeline, options).await.unwrap();

        assert!(result.success);
        assert_eq!(result.attempted(), vec!["source", "classify", "pathA"]);
        let logs = logs.lock().unwrap();
        assert!(logs
            .iter()
            .any(|(message, level)| *level == LogLevel::Warn && message.contains("ghost")));
    }

    #[tokio::test]
    async fn test_units_run_at_most_once() {
        let target = CountingUnit::default();
        let pipeline = Pipeline::define(vec![
            value("source", json!(1)),
            Unit::router("first", StaticRouter::new(&["target"])).with_input("v", "source:int:value"),
            Unit::router("second", StaticRouter::new(&["target", "target"]))
                .with_input("v", "source:int:value"),
            Unit::transform("target", target.clone())
                .with_input("a", "first:list:routes")
                .with_input("b", "second:list:routes"),
        ])
        .unwrap();

        let result = execute(&pipeline, ExecutionOptions::default().with_max_concurrency(2))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(target.count(), 1);
        assert_eq!(result.outputs["target"]["runs"], json!(1));
    }

    #[tokio::test]
    async fn test_repeated_runs_are_identical() {
        let pipeline = Pipeline::define(vec![
            value("b", json!(2)),
            value("a", json!(1)),
            Unit::transform("sum", EchoUnit)
                .with_input("a", "a:int:value")
                .with_input("b", "b:int:value"),
            Unit::transform("tail", EchoUnit).with_input("total", "sum:any:a"),
        ])
        .unwrap();

        let first = execute(&pipeline, ExecutionOptions::default()).await.unwrap();
        for _ in 0..5 {
            let next = execute(&pipeline, ExecutionOptions::default()).await.unwrap();
            assert_eq!(next.attempted(), first.attempted());
            assert_eq!(next.outputs, first.outputs);
        }
        assert_eq!(first.attempted(), vec!["a", "b", "sum", "tail"]);
    }

    #[tokio::test]
    async fn test_concurrency_runs_batches_together() {
        let units = || {
            vec![
                Unit::transform("s1", SleepingUnit::millis(200)),
                Unit::transform("s2", SleepingUnit::millis(200)),
                Unit::transform("s3", SleepingUnit::millis(200)),
                Unit::transform("z_join", EchoUnit)
                    .with_optional_input("one", "s1:any:x")
                    .with_optional_input("two", "s2:any:x"),
            ]
        };

        let sequential = execute(&Pipeline::define(units()).unwrap(), ExecutionOptions::default())
            .await
            .unwrap();

        let started = Instant::now();
        let parallel = execute(
            &Pipeline::define(units()).unwrap(),
            ExecutionOptions::default().with_max_concurrency(3),
        )
        .await
        .unwrap();

        assert!(started.elapsed() < Duration::from_millis(500));
        assert_eq!(parallel.attempted(), sequential.attempted());
        assert_eq!(parallel.outputs, sequential.outputs);
    }

    #[tokio::test]
    async fn test_validation_error_before_anything_runs() {
        let counter = CountingUnit::default();
        let pipeline = Pipeline::define(vec![
            Unit::transform("entry", counter.clone()),
            Unit::transform("a", EchoUnit).with_input("x", "b:any:out"),
            Unit::transform("b", EchoUnit).with_input("x", "a:any:out"),
        ])
        .unwrap();

        let executor = PipelineExecutor::new(ExecutionOptions::default());
        let err = executor.execute(&pipeline).await.unwrap_err();

        assert!(matches!(err, ValidationError::CyclicDependency { .. }));
        assert_eq!(counter.count(), 0);
        // the failure is cached with the plan
        assert_eq!(executor.execute(&pipeline).await.unwrap_err(), err);
    }

    #[tokio::test]
    async fn test_unknown_reference_rejected() {
        let pipeline = Pipeline::define(vec![
            value("source", json!(1)),
            Unit::transform("sink", EchoUnit).with_input("x", "missing:int:value"),
        ])
        .unwrap();

        let err = execute(&pipeline, ExecutionOptions::default()).await.unwrap_err();
        assert!(matches!(err, ValidationError::UnknownReference { .. }));
    }

    #[tokio::test]
    async fn test_definition_built_pipeline() {
        let yaml = r#"
units:
  - name: source
    unit: constant
    options: { text: "hello brave new world", kind: "loud" }
  - name: classify
    unit: field_router
    options:
      field: kind
      routes: { loud: shout, quiet: whisper }
    inputs:
      - { name: kind, source: "source:str:kind" }
  - name: shout
    unit: change_text_case
    options: { case: upper }
    inputs:
      - { name: route, source: "classify:list:routes" }
      - { name: text, source: "source:str:text" }
  - name: whisper
    unit: change_text_case_lower
    inputs:
      - { name: route, source: "classify:list:routes" }
      - { name: text, source: "source:str:text" }
  - name: count
    unit: token_counter
    inputs:
      - { name: text, source: "shout:str:text" }
"#;
        let definition: PipelineDefinition = serde_yaml::from_str(yaml).unwrap();
        let pipeline = definition.build(&LocalUnitFactory::new()).unwrap();

        let result = execute(&pipeline, definition.options.clone()).await.unwrap();

        assert!(result.success, "{:?}", result.error);
        assert_eq!(result.attempted(), vec!["source", "classify", "shout", "count"]);
        assert_eq!(result.outputs["shout"]["text"], json!("HELLO BRAVE NEW WORLD"));
        assert_eq!(result.outputs["count"]["word_count"], json!(4));
    }

    #[tokio::test]
    async fn test_continue_on_error_three_results() {
        let pipeline = Pipeline::define(vec![
            Unit::transform("source", EchoUnit),
            Unit::transform("failing", FailingUnit::new("always errors"))
                .with_optional_input("seed", "source:any:seed"),
            value("independent", json!("ok")),
        ])
        .unwrap();

        let result = execute(&pipeline, ExecutionOptions::default().with_continue_on_error(true))
            .await
            .unwrap();

        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(result.unit_results.len(), 3);
        assert_eq!(result.attempted(), vec!["source", "failing", "independent"]);
        assert!(result.unit_result("source").unwrap().success());
        assert!(result.unit_result("independent").unwrap().success());
        assert!(matches!(
            result.unit_result("failing").and_then(|r| r.error()),
            Some(UnitError::UnitExecutionError { message, .. }) if message == "always errors"
        ));
        assert!(result.output("failing").is_none());
    }

    fn failing_router_pipeline() -> Pipeline {
        Pipeline::define(vec![
            value("source", json!("a")),
            value("zz_other", json!("b")),
            Unit::router("classify", FailingRouter::new("no route"))
                .with_input("v", "source:str:value"),
            Unit::transform("pathA", EchoUnit).with_input("routes", "classify:list:routes"),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_router_failure_aborts_run() {
        let result = execute(&failing_router_pipeline(), ExecutionOptions::default())
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.attempted(), vec!["source", "zz_other", "classify"]);
        match result.error {
            Some(ExecutionError::UnitFailed { unit, source }) => {
                assert_eq!(unit, "classify");
                assert_eq!(
                    source,
                    UnitError::UnitExecutionError {
                        unit: "classify".into(),
                        message: "no route".into(),
                    }
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_router_failure_tolerated() {
        let (options, logs) = capture_logs();
        let result = execute(&failing_router_pipeline(), options.with_continue_on_error(true))
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.attempted(), vec!["source", "zz_other", "classify"]);
        assert_eq!(result.failed().count(), 1);
        assert!(result.unit_result("pathA").is_none());
        assert!(result.outputs.get("classify").is_none());

        let logs = logs.lock().unwrap();
        assert!(logs
            .iter()
            .any(|(message, level)| *level == LogLevel::Warn && message.contains("classify")));
    }

    #[tokio::test]
    async fn test_timed_out_unit_keeps_running_detached() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = finished.clone();
        let slow = Unit::transform(
            "slow",
            TransformFn::new(move |_inputs: Record| {
                let flag = flag.clone();
                async move {
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    flag.store(true, Ordering::SeqCst);
                    let mut out = Record::new();
                    out.insert("late".into(), json!(true));
                    Ok(out)
                }
            }),
        );
        let pipeline = Pipeline::define(vec![slow, value("zz", json!(1))]).unwrap();

        let result = execute(
            &pipeline,
            ExecutionOptions::default()
                .with_unit_timeout_ms(10)
                .with_continue_on_error(true),
        )
        .await
        .unwrap();

        assert!(result.success);
        assert_eq!(result.attempted(), vec!["slow", "zz"]);
        assert_eq!(
            result.unit_result("slow").and_then(|r| r.error()),
            Some(&UnitError::ExecutionTimeout {
                unit: "slow".into(),
                timeout_ms: 10
            })
        );

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(finished.load(Ordering::SeqCst));
        assert!(result.outputs.get("slow").is_none());
        assert_eq!(result.outputs["zz"]["value"], json!(1));
    }

    #[tokio::test]
    async fn test_validation_logged_through_logger_on_every_run() {
        let pipeline = Pipeline::define(vec![
            Unit::transform("entry", EchoUnit),
            Unit::transform("a", EchoUnit).with_input("x", "b:any:out"),
            Unit::transform("b", EchoUnit).with_input("x", "a:any:out"),
        ])
        .unwrap();
        let (options, logs) = capture_logs();
        let executor = PipelineExecutor::new(options);

        for _ in 0..2 {
            logs.lock().unwrap().clear();
            assert!(executor.execute(&pipeline).await.is_err());

            let logs = logs.lock().unwrap();
            assert!(logs.iter().any(|(message, level)| *level == LogLevel::Info
                && message.starts_with("Validating pipeline")));
            assert!(logs.iter().any(|(message, level)| *level == LogLevel::Error
                && message.contains("Cyclic dependency detected: a -> b -> a")));
        }

        let (options, logs) = capture_logs();
        execute(&hello_pipeline(), options).await.unwrap();
        assert!(logs
            .lock()
            .unwrap()
            .iter()
            .any(|(message, _)| message.starts_with("Pipeline validated")));
    }
}
