/// 美股報價採集
pub mod quote;
