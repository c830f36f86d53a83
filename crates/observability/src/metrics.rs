//! 通知分发指标收集模块
//!
//! 基于 `NotifyReport` / `DeliveryReport` 收集和统计通知服务的运行指标。

use std::collections::HashMap;

use contracts::{DeliveryReport, NotifyReport};
use metrics::{counter, gauge, histogram};

/// 记录一次提交
pub fn record_submission() {
    counter!("courier_submissions_total").increment(1);
}

/// 记录单个渠道的投递结果
pub fn record_delivery(channel: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "courier_deliveries_total",
        "channel" => channel.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// 记录 reactor 失败
pub fn record_reactor_failure(reactor: &str) {
    counter!(
        "courier_reactor_failures_total",
        "reactor" => reactor.to_string()
    )
    .increment(1);
}

/// 记录一次 fan-out 的耗时
pub fn record_fanout_latency_ms(latency_ms: f64) {
    histogram!("courier_fanout_latency_ms").record(latency_ms);
}

/// 记录历史记录长度
pub fn record_history_len(len: usize) {
    gauge!("courier_history_entries").set(len as f64);
}

/// 从 `NotifyReport` 记录 reactor 指标
pub fn record_notify_report(report: &NotifyReport) {
    for failure in &report.failures {
        record_reactor_failure(&failure.reactor);
    }
}

/// 从 `DeliveryReport` 记录渠道指标
pub fn record_delivery_report(report: &DeliveryReport) {
    for channel in &report.delivered {
        record_delivery(channel, true);
    }
    for failure in &report.failures {
        record_delivery(&failure.channel, false);
    }
}

/// 分发指标聚合器
///
/// 在内存中聚合指标，便于统计和输出摘要。
#[derive(Debug, Clone, Default)]
pub struct DispatchMetricsAggregator {
    /// 总提交数
    pub total_submissions: u64,

    /// 所有 reactor 都成功的提交数
    pub clean_submissions: u64,

    /// 成功投递总数
    pub total_delivered: u64,

    /// 失败投递总数
    pub total_delivery_failures: u64,

    /// Fan-out 耗时统计 (毫秒)
    pub fanout_stats: RunningStats,

    /// 各 reactor 失败次数
    pub reactor_failures: HashMap<String, u64>,

    /// 各渠道失败次数
    pub channel_failures: HashMap<String, u64>,
}

impl DispatchMetricsAggregator {
    /// 创建新的聚合器
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新聚合统计
    pub fn update(
        &mut self,
        notify: &NotifyReport,
        delivery: Option<&DeliveryReport>,
        fanout_ms: f64,
    ) {
        self.total_submissions += 1;
        if notify.is_clean() {
            self.clean_submissions += 1;
        }
        for failure in &notify.failures {
            *self
                .reactor_failures
                .entry(failure.reactor.clone())
                .or_insert(0) += 1;
        }

        if let Some(delivery) = delivery {
            self.total_delivered += delivery.delivered.len() as u64;
            self.total_delivery_failures += delivery.failures.len() as u64;
            for failure in &delivery.failures {
                *self
                    .channel_failures
                    .entry(failure.channel.clone())
                    .or_insert(0) += 1;
            }
        }

        self.fanout_stats.push(fanout_ms);
    }

    /// 生成摘要报告
    pub fn summary(&self) -> MetricsSummary {
        let attempts = self.total_delivered + self.total_delivery_failures;
        MetricsSummary {
            total_submissions: self.total_submissions,
            clean_submissions: self.clean_submissions,
            total_delivered: self.total_delivered,
            total_delivery_failures: self.total_delivery_failures,
            delivery_failure_rate: if attempts > 0 {
                self.total_delivery_failures as f64 / attempts as f64 * 100.0
            } else {
                0.0
            },
            fanout_ms: StatsSummary::from(&self.fanout_stats),
            reactor_failures: self.reactor_failures.clone(),
            channel_failures: self.channel_failures.clone(),
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 指标摘要
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    pub total_submissions: u64,
    pub clean_submissions: u64,
    pub total_delivered: u64,
    pub total_delivery_failures: u64,
    pub delivery_failure_rate: f64,
    pub fanout_ms: StatsSummary,
    pub reactor_failures: HashMap<String, u64>,
    pub channel_failures: HashMap<String, u64>,
}

impl std::fmt::Display for MetricsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Dispatch Metrics Summary ===")?;
        writeln!(
            f,
            "Submissions: {} ({} clean)",
            self.total_submissions, self.clean_submissions
        )?;
        writeln!(f, "Deliveries: {}", self.total_delivered)?;
        writeln!(
            f,
            "Failed deliveries: {} ({:.2}%)",
            self.total_delivery_failures, self.delivery_failure_rate
        )?;
        writeln!(f, "Fan-out latency (ms): {}", self.fanout_ms)?;

        if !self.reactor_failures.is_empty() {
            writeln!(f, "Reactor failures:")?;
            for (reactor, count) in &self.reactor_failures {
                writeln!(f, "  {}: {}", reactor, count)?;
            }
        }
        if !self.channel_failures.is_empty() {
            writeln!(f, "Channel failures:")?;
            for (channel, count) in &self.channel_failures {
                writeln!(f, "  {}: {}", channel, count)?;
            }
        }

        Ok(())
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 样本方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
