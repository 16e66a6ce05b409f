//! 按名称 / ID 查找资源
//!
//! 平台的 `name` 过滤可能返回模糊匹配的结果，这里只接受名称完全相同
//! （区分大小写）的资源：没有匹配返回 `NotFound`，多个匹配返回 `AmbiguousName`。

use crate::error::{AcsError, Result};

/// 带 ID 与名称的资源
pub trait Named {
    /// 资源类型名，用于错误信息
    const KIND: &'static str;

    fn resource_id(&self) -> &str;

    fn resource_name(&self) -> &str;
}

/// 从列表结果中选出名称完全匹配的唯一资源
pub fn select_by_name<T: Named>(items: Vec<T>, name: &str) -> Result<T> {
    let mut matches: Vec<T> = items
        .into_iter()
        .filter(|item| item.resource_name() == name)
        .collect();

    match matches.len() {
        0 => Err(AcsError::NotFound(format!("{} {}", T::KIND, name))),
        1 => Ok(matches.remove(0)),
        n => Err(AcsError::AmbiguousName(name.to_string(), n)),
    }
}

/// 从列表结果中选出 ID 匹配的资源
pub fn select_by_id<T: Named>(items: Vec<T>, id: &str) -> Result<T> {
    items
        .into_iter()
        .find(|item| item.resource_id() == id)
        .ok_or_else(|| AcsError::NotFound(format!("{} {}", T::KIND, id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pool {
        id: &'static str,
        name: &'static str,
    }

    impl Named for Pool {
        const KIND: &'static str = "存储池";

        fn resource_id(&self) -> &str {
            self.id
        }

        fn resource_name(&self) -> &str {
            self.name
        }
    }

    fn pools() -> Vec<Pool> {
        vec![
            Pool { id: "p1", name: "pool" },
            Pool { id: "p2", name: "pool-backup" },
            Pool { id: "p3", name: "Pool" },
        ]
    }

    #[test]
    fn test_exact_match_wins_over_substring() {
        let pool = select_by_name(pools(), "pool").unwrap();
        assert_eq!(pool.id, "p1");
    }

    #[test]
    fn test_lone_fuzzy_match_is_rejected() {
        let items = vec![Pool { id: "p2", name: "pool-backup" }];
        assert!(matches!(
            select_by_name(items, "pool"),
            Err(AcsError::NotFound(_))
        ));
    }

    #[test]
    fn test_multiple_exact_matches_are_ambiguous() {
        let items = vec![
            Pool { id: "p1", name: "pool" },
            Pool { id: "p4", name: "pool" },
        ];
        match select_by_name(items, "pool") {
            Err(AcsError::AmbiguousName(name, n)) => {
                assert_eq!(name, "pool");
                assert_eq!(n, 2);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_select_by_id() {
        assert_eq!(select_by_id(pools(), "p3").unwrap().name, "Pool");
        assert!(select_by_id(pools(), "p9").is_err());
    }
}
