// lexhop.rs - Hop accelerator for the scan operator.
//
// If `~` is followed by a literal, or by a group opening with a run of
// literals, every match of that element starts with the run. The data can
// then be probed every k-th byte against a 64-bit mask of the run's bytes
// (see `shift`), skipping k bytes whenever the probed byte cannot be part
// of the run. Single-byte runs go straight to `memchr`.

use crate::lexint::*;

#[derive(Clone, Copy, Debug)]
pub struct Hop<'p> {
    run: &'p [u8],
    mask: u64,
}

impl<'p> Hop<'p> {
    /// Builds the hop for the element at `p`, or `None` if it does not
    /// open with a maskable literal.
    pub fn for_element(pattern: &'p [u8], p: usize) -> Option<Hop<'p>> {
        let first = *pattern.get(p)?;
        let (start, end) = if first == OP_GROUP_OPEN {
            let mut q = p;
            while q < pattern.len() && pattern[q] == OP_GROUP_OPEN {
                q += 1;
            }
            let start = q;
            while q < pattern.len() && is_maskable(pattern[q]) {
                q += 1;
            }
            (start, q)
        } else if is_maskable(first) {
            (p, p + 1)
        } else {
            return None;
        };
        if start == end {
            return None;
        }
        let run = &pattern[start..end];
        Some(Hop {
            run,
            mask: mask_of(run),
        })
    }

    /// The literal run every candidate must start with.
    #[inline]
    pub fn run(&self) -> &'p [u8] {
        self.run
    }

    #[inline]
    fn hits(&self, b: u8) -> bool {
        self.mask & (1u64 << shift(b)) != 0
    }

    /// First position at or after `from` where the run occurs in `data`,
    /// or where the data ends inside a prefix of the run. `data.len()` if
    /// there is neither.
    pub fn next(&self, data: &[u8], from: usize) -> usize {
        if from >= data.len() {
            return data.len();
        }
        let k = self.run.len();
        if k == 1 {
            return memchr::memchr(self.run[0], &data[from..]).map_or(data.len(), |i| from + i);
        }
        // every start below `s` is excluded
        let mut s = from;
        while s + k <= data.len() {
            let probe = s + k - 1;
            if !self.hits(data[probe]) {
                s += k;
                continue;
            }
            let last = probe.min(data.len() - k);
            for start in s..=last {
                if data[start] == self.run[0] && &data[start..start + k] == self.run {
                    return start;
                }
            }
            s = last + 1;
        }
        // the data ends inside the run
        for start in s..data.len() {
            let tail = &data[start..];
            if tail == &self.run[..tail.len()] {
                return start;
            }
        }
        data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_element_gives_single_byte_run() {
        let hop = Hop::for_element(b"a~b+c", 2).unwrap();
        assert_eq!(hop.run(), b"b");
    }

    #[test]
    fn group_gives_leading_literal_run() {
        let hop = Hop::for_element(b"~(Huck@+)", 1).unwrap();
        assert_eq!(hop.run(), b"Huck");
        let hop = Hop::for_element(b"~((ab)c)", 1).unwrap();
        assert_eq!(hop.run(), b"ab");
    }

    #[test]
    fn operators_give_no_hop() {
        assert!(Hop::for_element(b"~#", 1).is_none());
        assert!(Hop::for_element(b"~(\\#bc)", 1).is_none());
        assert!(Hop::for_element(b"~([v]bc)", 1).is_none());
        assert!(Hop::for_element(b"~{a}", 1).is_none());
        assert!(Hop::for_element(b"~", 1).is_none());
        assert!(Hop::for_element("~ä".as_bytes(), 1).is_none());
    }

    #[test]
    fn finds_first_occurrence() {
        let data = b"The author is Mark Twain. The book is titled Huckleberry Finn.";
        let hop = Hop::for_element(b"(Twain)", 0).unwrap();
        assert_eq!(hop.next(data, 0), 19);
        let hop = Hop::for_element(b"(Huck)", 0).unwrap();
        assert_eq!(hop.next(data, 0), 45);
        assert_eq!(hop.next(data, 46), data.len());
    }

    #[test]
    fn finds_run_at_every_alignment() {
        let hop = Hop::for_element(b"(bc)", 0).unwrap();
        assert_eq!(hop.next(b"abdbc", 1), 3);
        assert_eq!(hop.next(b"bc", 0), 0);
        assert_eq!(hop.next(b"xbc", 0), 1);
        assert_eq!(hop.next(b"xxbc", 0), 2);
        assert_eq!(hop.next(b"bcbc", 1), 2);
        assert_eq!(hop.next(b"ba", 0), 2);
        assert_eq!(hop.next(b"cbx", 0), 3);
    }

    #[test]
    fn finds_run_prefix_at_data_end() {
        let hop = Hop::for_element(b"(bc)", 0).unwrap();
        assert_eq!(hop.next(b"b", 0), 0);
        assert_eq!(hop.next(b"cb", 0), 1);
        assert_eq!(hop.next(b"xxxcb", 0), 4);
        let hop = Hop::for_element(b"(Huck)", 0).unwrap();
        assert_eq!(hop.next(b"xHu", 0), 1);
        assert_eq!(hop.next(b"Tom and Huc", 0), 8);
        assert_eq!(hop.next(b"Tom and Hux", 0), 11);
        let hop = Hop::for_element(b"(ab)", 0).unwrap();
        assert_eq!(hop.next(b"xxa", 0), 2);
    }

    #[test]
    fn case_folded_candidates_are_verified() {
        let hop = Hop::for_element(b"(abc)", 0).unwrap();
        assert_eq!(hop.next(b"ABCabc", 0), 3);
        assert_eq!(hop.next(b"ABC", 0), 3);
    }

    #[test]
    fn single_byte_run_uses_byte_search() {
        let hop = Hop::for_element(b"x", 0).unwrap();
        assert_eq!(hop.next(b"aaaxa", 1), 3);
        assert_eq!(hop.next(b"aaaa", 0), 4);
        assert_eq!(hop.next(b"x", 5), 1);
    }
}
