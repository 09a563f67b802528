mod enums;
mod record;
mod result;

// 导出常用项
pub use enums::{Category, DeviceOrigin, DeviceTier, PlatformOrigin};
pub use record::{
    AgentPlatformLink, AgentRecord, AgentRow, ClassRow, DeviceRecord, DeviceRow, PlatformRecord,
    PlatformRow, RuleRow,
};
pub use result::{AgentView, ClassificationResult, DeviceView, PlatformView};
