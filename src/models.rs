pub mod domain {
    use serde::Serialize;

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
    pub struct ProtocolCounts {
        #[serde(rename = "TCP")]
        pub tcp: usize,
        #[serde(rename = "UDP")]
        pub udp: usize,
        #[serde(rename = "ICMP")]
        pub icmp: usize,
    }

    impl ProtocolCounts {
        pub fn total(&self) -> usize {
            self.tcp + self.udp + self.icmp
        }
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
    pub struct AnomalyCounts {
        pub normal: usize,
        pub abnormal: usize,
    }

    /// One value from a numeric traffic column, as it appeared in the upload.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    #[serde(untagged)]
    pub enum Cell {
        Int(i64),
        Float(f64),
        Text(String),
        Missing,
    }

    impl Default for Cell {
        fn default() -> Self {
            Cell::Int(0)
        }
    }

    /// Head-of-column samples, in upload row order.
    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct AdditionalMetrics {
        pub duration: Vec<Cell>,
        pub src_bytes: Vec<Cell>,
        pub dst_bytes: Vec<Cell>,
    }

    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    pub struct Predictions {
        pub protocol_counts: ProtocolCounts,
        pub anomaly_data: AnomalyCounts,
        pub additional_metrics: AdditionalMetrics,
    }
}

pub mod dto {
    use serde::Serialize;

    #[derive(Debug, Serialize, Clone)]
    pub struct MessageDTO {
        pub message: String,
    }

    #[derive(Debug, Serialize, Clone)]
    pub struct ErrorDTO {
        pub error: String,
    }
}
