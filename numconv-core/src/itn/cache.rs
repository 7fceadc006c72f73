//! 转换结果缓存
//!
//! 由调用方持有，按输入文本缓存转换结果；超出容量时淘汰最早的记录。
//! 本身不加锁，多线程共享时由调用方包一层 Mutex。

use std::collections::{HashMap, VecDeque};

use crate::itn::NumeralNormalizer;

/// 转换结果缓存
#[derive(Debug, Clone)]
pub struct ConversionCache {
    normalizer: NumeralNormalizer,
    entries: HashMap<String, String>,
    /// 插入顺序（最早的在前）
    order: VecDeque<String>,
    /// 最大缓存条数，0 表示不缓存
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl ConversionCache {
    pub fn new(normalizer: NumeralNormalizer, capacity: usize) -> Self {
        Self {
            normalizer,
            entries: HashMap::new(),
            order: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// 取缓存结果，未命中时转换一次并记录
    pub fn normalize(&mut self, text: &str) -> String {
        if let Some(cached) = self.entries.get(text) {
            self.hits += 1;
            return cached.clone();
        }

        self.misses += 1;
        let converted = self.normalizer.normalize(text);
        if self.capacity == 0 {
            return converted;
        }

        self.entries.insert(text.to_string(), converted.clone());
        self.order.push_back(text.to_string());
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }

        converted
    }

    pub fn normalizer(&self) -> &NumeralNormalizer {
        &self.normalizer
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// 清空缓存
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
