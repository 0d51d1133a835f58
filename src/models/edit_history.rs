//! 编辑历史管理（Git 模型）
//!
//! 采用类似 Git 的 DAG 结构存储历史：
//! - 每个操作有唯一 ID 和父指针
//! - HEAD 指向当前状态
//! - 历史永不丢失，Undo 后新编辑会创建分支
//! - 一次批量替换只产生一个节点，一次 Undo 即可整体撤销

use super::edit_op::{EditOp, OpId};
use crate::kernel::services::ports::config::DEFAULT_CHECKPOINT_INTERVAL;
use ropey::Rope;
use rustc_hash::FxHashMap;

/// 编辑历史配置
#[derive(Clone, Debug)]
pub struct EditHistoryConfig {
    pub checkpoint_interval: usize,
}

impl Default for EditHistoryConfig {
    fn default() -> Self {
        Self {
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
        }
    }
}

/// 编辑历史（Git 模型）
pub struct EditHistory {
    /// 基准快照（文档打开时的状态，对应 root）
    base_snapshot: Rope,
    /// 所有操作（DAG 结构）
    ops: FxHashMap<OpId, EditOp>,
    /// 当前 HEAD 指向的操作 ID
    head: OpId,
    /// 子节点索引（parent -> children）
    children: FxHashMap<OpId, Vec<OpId>>,
    /// 检查点缓存（op_id -> snapshot）
    checkpoints: FxHashMap<OpId, Rope>,
    config: EditHistoryConfig,
    /// 操作计数（用于决定何时创建检查点）
    op_count: usize,
}

impl EditHistory {
    pub fn new(base_snapshot: Rope) -> Self {
        Self {
            base_snapshot,
            ops: FxHashMap::default(),
            head: OpId::root(),
            children: FxHashMap::default(),
            checkpoints: FxHashMap::default(),
            config: EditHistoryConfig::default(),
            op_count: 0,
        }
    }

    pub fn with_config(mut self, config: EditHistoryConfig) -> Self {
        self.config = config;
        self
    }

    /// 记录新操作，`current_rope` 为应用该操作后的文本
    pub fn push(&mut self, op: EditOp, current_rope: &Rope) {
        let op_id = op.id;

        self.children.entry(op.parent).or_default().push(op_id);
        self.ops.insert(op_id, op);

        self.head = op_id;
        self.op_count += 1;

        if self.op_count % self.config.checkpoint_interval.max(1) == 0 {
            self.checkpoints.insert(op_id, current_rope.clone());
        }
    }

    /// Undo：返回恢复后的 Rope 和光标位置
    pub fn undo(&mut self) -> Option<(Rope, usize)> {
        if self.head.is_root() {
            return None;
        }

        let current_op = self.ops.get(&self.head)?;
        let cursor = current_op.cursor_before();
        let parent_id = current_op.parent;

        self.head = parent_id;

        let rope = self.rebuild_rope_at(parent_id);
        Some((rope, cursor))
    }

    /// Redo：沿着最近的分支前进
    pub fn redo(&mut self) -> Option<(Rope, usize)> {
        let next_id = *self.children.get(&self.head)?.last()?;
        let cursor = self.ops.get(&next_id)?.cursor_after();

        self.head = next_id;

        let rope = self.rebuild_rope_at(next_id);
        Some((rope, cursor))
    }

    pub fn head(&self) -> OpId {
        self.head
    }

    pub fn can_undo(&self) -> bool {
        !self.head.is_root()
    }

    pub fn can_redo(&self) -> bool {
        self.children
            .get(&self.head)
            .map(|c| !c.is_empty())
            .unwrap_or(false)
    }

    pub fn get_op(&self, id: &OpId) -> Option<&EditOp> {
        self.ops.get(id)
    }

    pub fn children_of(&self, id: &OpId) -> Vec<OpId> {
        self.children.get(id).cloned().unwrap_or_default()
    }

    /// 从 HEAD 回溯历史（类似 git log）
    pub fn log(&self) -> Vec<&EditOp> {
        let mut result = Vec::new();
        let mut current = self.head;

        while !current.is_root() {
            match self.ops.get(&current) {
                Some(op) => {
                    result.push(op);
                    current = op.parent;
                }
                None => break,
            }
        }

        result
    }

    /// 清空历史，以 `current_rope` 作为新的基准
    pub fn clear(&mut self, current_rope: &Rope) {
        self.base_snapshot = current_rope.clone();
        self.ops.clear();
        self.head = OpId::root();
        self.children.clear();
        self.checkpoints.clear();
        self.op_count = 0;
    }

    /// 从最近的检查点重建指定位置的 Rope
    fn rebuild_rope_at(&self, target: OpId) -> Rope {
        if target.is_root() {
            return self.base_snapshot.clone();
        }

        let path = self.path_to(target);
        let (start_idx, mut rope) = self.find_nearest_checkpoint(&path);

        for op_id in &path[start_idx..] {
            if let Some(op) = self.ops.get(op_id) {
                op.apply(&mut rope);
            }
        }

        rope
    }

    /// 获取从 root 到指定节点的路径
    fn path_to(&self, target: OpId) -> Vec<OpId> {
        let mut path = Vec::new();
        let mut current = target;

        while !current.is_root() {
            path.push(current);
            match self.ops.get(&current) {
                Some(op) => current = op.parent,
                None => break,
            }
        }

        path.reverse();
        path
    }

    /// 找最近的检查点，返回 (路径中的起始索引, Rope)
    fn find_nearest_checkpoint(&self, path: &[OpId]) -> (usize, Rope) {
        for (i, op_id) in path.iter().enumerate().rev() {
            if let Some(snapshot) = self.checkpoints.get(op_id) {
                return (i + 1, snapshot.clone());
            }
        }
        (0, self.base_snapshot.clone())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/edit_history.rs"]
mod tests;
