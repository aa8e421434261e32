//! 业务逻辑服务模块
//! 
//! 封装数据获取和处理逻辑

pub mod intraday;  // 日内行情汇总服务
