//! 并查集
//!
//! 为 Kruskal 与 Borůvka 跟踪连通分量，支持路径压缩与按秩合并。
//! 每次算法调用时按顶点数新建，调用结束即丢弃。

/// 并查集（下标为 0..n 的稠密顶点编号）
#[derive(Debug, Clone)]
pub struct UnionFind {
    /// 父节点（根节点指向自身）
    parent: Vec<usize>,
    /// 秩（树高上界）
    rank: Vec<u32>,
    /// 当前分量数
    components: usize,
}

impl UnionFind {
    /// 创建 n 个单元素集合
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            components: n,
        }
    }

    /// 元素数量
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// 当前分量数
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// 查找根节点，同时把路径上的节点直接挂到根上
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// 合并两个元素所在的集合
    ///
    /// 两者原本就在同一集合时返回 false。
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let mut root_a = self.find(a);
        let mut root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        if self.rank[root_a] < self.rank[root_b] {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        if self.rank[root_a] == self.rank[root_b] {
            self.rank[root_a] += 1;
        }

        self.components -= 1;
        true
    }
}
