use super::ProcessCpu;
use std::collections::HashMap;

/// Merges per-process CPU readings by name and orders them busiest first.
///
/// Only readings above zero count. Processes that share a name are summed
/// into one entry, so separate PIDs of the same program lose their
/// identity. Equal totals keep the order in which the name was first seen.
pub fn rank_processes<I, S>(readings: I) -> Vec<ProcessCpu>
where
    I: IntoIterator<Item = (S, f32)>,
    S: Into<String>,
{
    let mut ranked: Vec<ProcessCpu> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (name, cpu) in readings {
        if cpu.is_nan() || cpu <= 0.0 {
            continue;
        }
        let name = name.into();
        match index.get(&name) {
            Some(&i) => ranked[i].cpu_percent += cpu,
            None => {
                index.insert(name.clone(), ranked.len());
                ranked.push(ProcessCpu::new(name, cpu));
            }
        }
    }

    // stable, so ties stay in first-seen order
    ranked.sort_by(|a, b| {
        b.cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(ranked: &[ProcessCpu]) -> Vec<(&str, f32)> {
        ranked
            .iter()
            .map(|p| (p.name.as_str(), p.cpu_percent))
            .collect()
    }

    #[test]
    fn merges_by_name() {
        let ranked = rank_processes([("a", 5.0), ("b", 3.0), ("a", 2.0)]);
        assert_eq!(pairs(&ranked), vec![("a", 7.0), ("b", 3.0)]);
    }

    #[test]
    fn drops_idle_processes() {
        let ranked = rank_processes([("idle", 0.0), ("busy", 1.5), ("nan", f32::NAN)]);
        assert_eq!(pairs(&ranked), vec![("busy", 1.5)]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let ranked = rank_processes([("x", 2.0), ("y", 4.0), ("z", 2.0), ("w", 2.0)]);
        assert_eq!(pairs(&ranked), vec![("y", 4.0), ("x", 2.0), ("z", 2.0), ("w", 2.0)]);
    }

    #[test]
    fn merged_entry_can_overtake() {
        let ranked = rank_processes([("big", 6.0), ("small", 4.0), ("small", 4.0)]);
        assert_eq!(pairs(&ranked), vec![("small", 8.0), ("big", 6.0)]);
    }

    #[test]
    fn empty_input() {
        let ranked = rank_processes(Vec::<(String, f32)>::new());
        assert!(ranked.is_empty());
    }
}
