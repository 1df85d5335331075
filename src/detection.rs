use crate::error::AggregateError;
use crate::models::domain::{AdditionalMetrics, AnomalyCounts, Cell, Predictions, ProtocolCounts};
use crate::parser::{Table, TrafficFrame, PROTOCOL_TYPE};

pub const METRIC_SAMPLE_LEN: usize = 10;

const NORMAL_LABEL: &str = "normal";

/// Run every aggregator over an uploaded table. Nothing is returned unless all of them succeed.
pub fn aggregate(table: &Table) -> Result<Predictions, AggregateError> {
    let frame = TrafficFrame::infer(table);

    // Protocol mix (requires protocol_type)
    let protocol_counts = count_protocol_types(&frame)?;

    // Normal vs. abnormal labels
    let anomaly_data = detect_anomalies(&frame);

    // Head-of-column samples
    let additional_metrics = sample_metrics(&frame);

    Ok(Predictions {
        protocol_counts,
        anomaly_data,
        additional_metrics,
    })
}

/// Bucket rows by protocol, case-insensitively. Anything other than tcp/udp/icmp is dropped.
pub fn count_protocol_types(frame: &TrafficFrame) -> Result<ProtocolCounts, AggregateError> {
    let protocols = frame
        .protocol_type
        .as_ref()
        .ok_or(AggregateError::MissingColumn(PROTOCOL_TYPE))?;

    let mut counts = ProtocolCounts::default();
    for protocol in protocols {
        match protocol.to_lowercase().as_str() {
            "tcp" => counts.tcp += 1,
            "udp" => counts.udp += 1,
            "icmp" => counts.icmp += 1,
            _ => {}
        }
    }
    Ok(counts)
}

/// Without a class column every row is considered normal.
pub fn detect_anomalies(frame: &TrafficFrame) -> AnomalyCounts {
    match &frame.class {
        Some(labels) => {
            let normal = labels.iter().filter(|label| *label == NORMAL_LABEL).count();
            AnomalyCounts {
                normal,
                abnormal: labels.len() - normal,
            }
        }
        None => AnomalyCounts {
            normal: frame.rows,
            abnormal: 0,
        },
    }
}

pub fn sample_metrics(frame: &TrafficFrame) -> AdditionalMetrics {
    AdditionalMetrics {
        duration: head(&frame.duration),
        src_bytes: head(&frame.src_bytes),
        dst_bytes: head(&frame.dst_bytes),
    }
}

fn head(column: &[Cell]) -> Vec<Cell> {
    column.iter().take(METRIC_SAMPLE_LEN).cloned().collect()
}
