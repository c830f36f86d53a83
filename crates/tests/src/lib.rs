//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 端到端提交流程 (service -> hub -> reactors -> channels)
//! - 并发 attach/detach/submit 压力测试

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use contracts::{Content, ContractError, DeliveryChannel, Reactor};

    /// Channel that records what it receives, or always fails
    pub struct FakeChannel {
        name: String,
        received: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl FakeChannel {
        pub fn new(name: &str) -> (Box<Self>, Arc<Mutex<Vec<String>>>) {
            let received = Arc::new(Mutex::new(Vec::new()));
            let channel = Box::new(Self {
                name: name.to_string(),
                received: Arc::clone(&received),
                fail: false,
            });
            (channel, received)
        }

        pub fn failing(name: &str) -> (Box<Self>, Arc<Mutex<Vec<String>>>) {
            let (mut channel, received) = Self::new(name);
            channel.fail = true;
            (channel, received)
        }
    }

    impl DeliveryChannel for FakeChannel {
        fn name(&self) -> &str {
            &self.name
        }

        fn destination(&self) -> Option<&str> {
            None
        }

        fn deliver(&mut self, text: &str) -> Result<(), ContractError> {
            if self.fail {
                return Err(ContractError::delivery(&self.name, "destination unreachable"));
            }
            self.received.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    /// Reactor that appends `name` to a shared journal on every update
    pub struct OrderRecorder {
        name: String,
        journal: Arc<Mutex<Vec<String>>>,
    }

    impl OrderRecorder {
        pub fn new(name: &str, journal: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                journal: Arc::clone(journal),
            })
        }
    }

    impl Reactor for OrderRecorder {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_update(&self, content: &dyn Content) -> Result<(), ContractError> {
            self.journal
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, content.read()));
            Ok(())
        }
    }

    /// Reactor that keeps every text it sees
    #[derive(Default)]
    pub struct Collector {
        seen: Mutex<Vec<String>>,
    }

    impl Collector {
        pub fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Reactor for Collector {
        fn name(&self) -> &str {
            "collector"
        }

        fn on_update(&self, content: &dyn Content) -> Result<(), ContractError> {
            self.seen.lock().unwrap().push(content.read());
            Ok(())
        }
    }
}

#[cfg(test)]
mod contract_tests {
    use contracts::{ContractError, DeliveryFailure, NotifyReport, ReactorFailure};

    #[test]
    fn test_config_version_wire_name() {
        let version = contracts::ConfigVersion::default();
        assert_eq!(serde_json::to_value(version).unwrap(), serde_json::json!("V1"));
        let parsed: contracts::ConfigVersion = serde_json::from_str("\"V1\"").unwrap();
        assert_eq!(parsed, version);
    }

    #[test]
    fn test_report_json_snapshot() {
        let report = NotifyReport {
            notified: 2,
            failures: vec![ReactorFailure::new("engine", "1 of 2 channel deliveries failed")],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "notified": 2,
                "failures": [
                    { "reactor": "engine", "message": "1 of 2 channel deliveries failed" }
                ]
            })
        );
    }

    #[test]
    fn test_partial_delivery_message() {
        let err = ContractError::PartialDelivery {
            total: 3,
            failures: vec![DeliveryFailure::new("sms", "invalid phone")],
        };
        assert_eq!(err.to_string(), "1 of 3 channel deliveries failed");
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::{Arc, Mutex};

    use content::{ContentExt, DecorationChain, TextContent};
    use contracts::Content;
    use dispatcher::{DispatchEngine, DispatchHub, LogReactor};
    use notification_service::NotificationService;

    use crate::support::{FakeChannel, OrderRecorder};

    /// Signed "Hello" reaches the logger, both channels and the history unchanged
    #[test]
    fn test_e2e_signed_hello() {
        let service = NotificationService::new(DispatchHub::new());

        let logger = Arc::new(LogReactor::new("audit"));
        let engine = Arc::new(DispatchEngine::new("engine"));
        let (first, first_received) = FakeChannel::new("first");
        let (second, second_received) = FakeChannel::new("second");
        engine.add_channel(first);
        engine.add_channel(second);

        service.hub().attach(logger.clone());
        service.hub().attach(engine.clone());

        let report = service.submit(Arc::new(TextContent::new("Hello").signed_by("X")));

        assert!(report.is_clean());
        assert_eq!(report.notify.notified, 2);
        assert_eq!(logger.entries(), vec!["Hello :: signed_by: X"]);
        assert_eq!(*first_received.lock().unwrap(), vec!["Hello :: signed_by: X"]);
        assert_eq!(*second_received.lock().unwrap(), vec!["Hello :: signed_by: X"]);

        let history = service.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content.read(), "Hello :: signed_by: X");
    }

    /// Logger attached first observes every submission before the engine
    #[test]
    fn test_notification_ordering() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let service = NotificationService::new(DispatchHub::new());
        service.hub().attach(OrderRecorder::new("logger", &journal));
        service.hub().attach(OrderRecorder::new("engine", &journal));

        for text in ["one", "two", "three"] {
            service.submit(Arc::new(TextContent::new(text)));
        }

        assert_eq!(
            *journal.lock().unwrap(),
            vec![
                "logger:one",
                "engine:one",
                "logger:two",
                "engine:two",
                "logger:three",
                "engine:three",
            ]
        );
    }

    /// Channel 2 of 3 fails; 1 and 3 still receive the content
    #[test]
    fn test_fanout_completeness_under_partial_failure() {
        let service = NotificationService::new(DispatchHub::new());
        let engine = Arc::new(DispatchEngine::new("engine"));
        let (one, one_received) = FakeChannel::new("one");
        let (two, two_received) = FakeChannel::failing("two");
        let (three, three_received) = FakeChannel::new("three");
        engine.add_channel(one);
        engine.add_channel(two);
        engine.add_channel(three);
        service.hub().attach(engine.clone());

        let report = service.submit(Arc::new(TextContent::new("payload")));

        assert_eq!(*one_received.lock().unwrap(), vec!["payload"]);
        assert!(two_received.lock().unwrap().is_empty());
        assert_eq!(*three_received.lock().unwrap(), vec!["payload"]);

        // Reported, not hidden, and never rolled back
        assert_eq!(report.notify.failures.len(), 1);
        assert_eq!(report.notify.failures[0].reactor, "engine");
        assert!(report.notify.failures[0]
            .message
            .contains("1 of 3 channel deliveries failed"));
        assert_eq!(service.history_len(), 1);

        let metrics = engine.metrics();
        assert_eq!(metrics[1].1.failure_count, 1);
    }

    /// N submissions give N entries, in order, earlier ones untouched
    #[test]
    fn test_history_append_only() {
        let service = NotificationService::new(DispatchHub::new());

        service.submit(Arc::new(TextContent::new("first")));
        let before = service.history();

        for i in 2..=5 {
            service.submit(Arc::new(TextContent::new(format!("msg {i}"))));
        }
        let after = service.history();

        assert_eq!(after.len(), 5);
        assert_eq!(before.len(), 1);
        assert_eq!(after[0].sequence, before[0].sequence);
        assert_eq!(after[0].content.read(), "first");
        assert!(Arc::ptr_eq(&after[0].content, &before[0].content));
        let sequences: Vec<u64> = after.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3, 4, 5]);
        assert_eq!(after[4].content.read(), "msg 5");
    }

    /// Attaching the same reactor twice yields one notification per submission
    #[test]
    fn test_attach_idempotence() {
        let service = NotificationService::new(DispatchHub::new());
        let logger = Arc::new(LogReactor::new("audit"));

        assert!(service.hub().attach(logger.clone()));
        assert!(!service.hub().attach(logger.clone()));

        service.submit(Arc::new(TextContent::new("once")));
        assert_eq!(logger.entries(), vec!["once"]);
    }

    /// Same chain, same text; re-reading is idempotent
    #[test]
    fn test_decoration_order_determinism() {
        let chain = DecorationChain::new().header("A").signature("B");
        let first = chain.compose("base");
        let second = chain.compose("base");
        assert_eq!(first.read(), "[A] base :: signed_by: B");
        assert_eq!(first.read(), second.read());
        assert_eq!(first.read(), first.read());

        let reversed = DecorationChain::new().signature("B").header("A");
        assert_eq!(reversed.compose("base").read(), "[A] base :: signed_by: B");

        let nested = TextContent::new("base").signed_by("B").with_header("A");
        assert_eq!(nested.read(), first.read());
    }
}

#[cfg(test)]
mod config_e2e_tests {
    use std::fs;
    use std::path::Path;

    use config_loader::ConfigLoader;
    use dispatcher::OutboxRecord;
    use notification_service::NotificationService;

    /// TOML blueprint -> service -> outbox file on disk
    #[test]
    fn test_blueprint_to_outbox() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = dir.path().join("outbox.jsonl");
        let config_path = dir.path().join("courier.toml");
        let toml = format!(
            r#"
[service]
name = "alerts"

[[decorations]]
kind = "header"
text = "ALERT"

[[decorations]]
kind = "signature"
signer = "ops"

[[channels]]
name = "desk"
channel_type = "popup"

[[channels]]
name = "archive"
channel_type = "outbox"
params = {{ path = "{}" }}
"#,
            outbox.display().to_string().replace('\\', "\\\\")
        );
        fs::write(&config_path, toml).unwrap();

        let blueprint = ConfigLoader::load_from_path(Path::new(&config_path)).unwrap();
        let service = NotificationService::from_blueprint(&blueprint).unwrap();

        let first = service.send("disk full");
        let second = service.send("disk ok");

        assert!(first.is_clean() && second.is_clean());
        assert_eq!(
            first.delivery.unwrap().delivered,
            vec!["desk", "archive"]
        );

        let records: Vec<OutboxRecord> = fs::read_to_string(&outbox)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].channel, "archive");
        assert_eq!(records[0].text, "[ALERT] disk full :: signed_by: ops");
        assert_eq!(records[1].text, "[ALERT] disk ok :: signed_by: ops");

        assert_eq!(
            service.logger().unwrap().entries(),
            vec![
                "[ALERT] disk full :: signed_by: ops",
                "[ALERT] disk ok :: signed_by: ops"
            ]
        );
    }

    #[test]
    fn test_invalid_sms_channel_rejected_at_load() {
        let toml = r#"
[[channels]]
name = "pager"
channel_type = "sms"
params = { phone = "call me" }
"#;
        let err = ConfigLoader::load_from_str(toml, config_loader::ConfigFormat::Toml).unwrap_err();
        assert!(err.to_string().contains("pager"), "got {err}");
    }
}

#[cfg(test)]
mod stress_tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;

    use content::TextContent;
    use contracts::{
        ChannelConfig, ChannelType, ContractError, DeliveryChannel, ServiceBlueprint,
    };
    use dispatcher::DispatchHub;
    use notification_service::NotificationService;

    use crate::support::Collector;

    const THREADS: usize = 8;
    const ROUNDS: usize = 50;

    /// Concurrent attach/detach/submit: no crash, no duplicate notification,
    /// final reactor set equals the net effect of every attach and detach.
    #[test]
    fn test_concurrent_attach_detach_submit() {
        let service = NotificationService::new(DispatchHub::new());
        let permanent = Arc::new(Collector::default());
        service.hub().attach(permanent.clone());

        let kept: Vec<Vec<Arc<Collector>>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|t| {
                    let service = &service;
                    scope.spawn(move || {
                        let mut kept = Vec::new();
                        for i in 0..ROUNDS {
                            let reactor = Arc::new(Collector::default());
                            assert!(service.hub().attach(reactor.clone()));
                            assert!(!service.hub().attach(reactor.clone()));

                            let text = format!("{t}-{i}");
                            service.submit(Arc::new(TextContent::new(text.clone())));

                            // Attached before and detached after its own submit
                            assert_eq!(
                                reactor.seen().iter().filter(|s| **s == text).count(),
                                1
                            );

                            if i % 2 == 0 {
                                service.hub().detach(&reactor).unwrap();
                            } else {
                                kept.push(reactor);
                            }
                        }
                        kept
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let kept: Vec<Arc<Collector>> = kept.into_iter().flatten().collect();
        assert_eq!(kept.len(), THREADS * ROUNDS / 2);
        assert_eq!(service.hub().reactor_count(), 1 + kept.len());
        for reactor in &kept {
            assert!(service.hub().is_attached(reactor));
        }

        // Every submission seen exactly once by the permanent reactor,
        // in history order
        let seen = permanent.seen();
        assert_eq!(seen.len(), THREADS * ROUNDS);
        assert_eq!(seen.iter().collect::<HashSet<_>>().len(), seen.len());
        let history: Vec<String> = service
            .history()
            .iter()
            .map(|e| e.content.read())
            .collect();
        assert_eq!(seen, history);

        for reactor in &kept {
            let seen = reactor.seen();
            assert_eq!(seen.iter().collect::<HashSet<_>>().len(), seen.len());
        }
    }

    /// Rejects every text starting with 'B'
    struct RejectsB;

    impl DeliveryChannel for RejectsB {
        fn name(&self) -> &str {
            "rejects-b"
        }

        fn destination(&self) -> Option<&str> {
            None
        }

        fn deliver(&mut self, text: &str) -> Result<(), ContractError> {
            if text.starts_with('B') {
                return Err(ContractError::delivery("rejects-b", "refused"));
            }
            Ok(())
        }
    }

    /// An engine shared with a second, busy hub still reports each
    /// submission's own delivery.
    #[test]
    fn test_shared_engine_reports_own_delivery() {
        let blueprint =
            ServiceBlueprint::with_channels(vec![ChannelConfig::new("desktop", ChannelType::Popup)]);
        let service = NotificationService::from_blueprint(&blueprint).unwrap();
        let engine = service.engine().unwrap().clone();
        engine.add_channel(Box::new(RejectsB));

        let other = DispatchHub::new();
        other.attach(engine.clone());
        let stop = AtomicBool::new(false);

        let misattributed = thread::scope(|scope| {
            scope.spawn(|| {
                while !stop.load(Ordering::Relaxed) {
                    other.set_content(Arc::new(TextContent::new("B")));
                }
            });

            let misattributed = (0..THREADS * ROUNDS * 5)
                .filter(|i| {
                    let report = service.submit(Arc::new(TextContent::new(format!("A{i}"))));
                    !matches!(report.delivery, Some(ref d) if d.is_complete() && d.delivered.len() == 2)
                })
                .count();
            stop.store(true, Ordering::Relaxed);
            misattributed
        });

        assert_eq!(misattributed, 0);
        assert_eq!(engine.take_last_report(), None);
    }
}
