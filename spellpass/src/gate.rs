//! Spell-checking sessions: requests wait behind the dictionary load, then
//! are served in submission order.
use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::SuggestionCache;
use crate::config::{Config, SpellOptions};
use crate::dictionary::{self, SharedSpeller};
use crate::error::{ConfigError, LoadError};
use crate::file::SourceFile;
use crate::tree::Node;
use crate::walker::Walker;

/// Where a session is in its one dictionary load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Loading,
    Ready,
    Failed,
}

type Done = Box<dyn FnOnce(Result<(), LoadError>, SourceFile) + Send>;

struct Pending {
    tree: Node,
    file: SourceFile,
    done: Done,
}

enum Gate {
    Loading,
    Ready(SharedSpeller),
    Failed(LoadError),
}

struct Session {
    gate: Gate,
    /// requests waiting for the load, then for the replay to reach them
    queue: VecDeque<Pending>,
    /// set from the load completing until the queue is drained
    flushing: bool,
    cache: SuggestionCache,
}

/// One configured session over one dictionary load.
///
/// The dictionary starts loading when the session is created. Checks
/// submitted before it finishes are queued and replayed in order once it
/// has; if it fails, every request, queued or later, gets the same
/// [`LoadError`].
///
/// ```
/// use spellpass::{SourceFile, Spell, WordList};
/// use spellpass::tokenizer::parse;
///
/// let spell = Spell::new(Box::new(WordList::new("colour\nand\n"))).unwrap();
/// spell.check(parse("colour and color"), SourceFile::new(), |result, file| {
///     assert!(result.is_ok());
///     assert_eq!(file.messages.len(), 1);
/// });
/// ```
#[derive(Clone)]
pub struct Spell {
    config: Arc<Config>,
    session: Arc<Mutex<Session>>,
}

impl Spell {
    /// Validates `options` and starts loading the dictionary.
    ///
    /// Fails with [`ConfigError::MissingDictionary`] when no dictionary was
    /// given; load failures only ever reach the `done` callbacks of
    /// [`check`](Self::check).
    pub fn new(options: impl Into<SpellOptions>) -> Result<Spell, ConfigError> {
        let (config, source, personal) = options.into().into_parts()?;
        let config = Arc::new(config);

        let spell = Spell {
            session: Arc::new(Mutex::new(Session {
                gate: Gate::Loading,
                queue: VecDeque::new(),
                flushing: false,
                cache: SuggestionCache::new(config.max),
            })),
            config,
        };

        let session = Arc::downgrade(&spell.session);
        let config = Arc::clone(&spell.config);

        log::debug!("loading dictionary");
        dictionary::load(source, personal, move |result| match session.upgrade() {
            Some(session) => complete(&session, &config, result),
            None => log::debug!("session dropped before its dictionary loaded"),
        });

        Ok(spell)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> State {
        match self.session.lock().gate {
            Gate::Loading => State::Loading,
            Gate::Ready(_) => State::Ready,
            Gate::Failed(_) => State::Failed,
        }
    }

    /// Checks `tree`, reporting misspellings on `file`, and hands the file
    /// back through `done`.
    ///
    /// Once the dictionary is loaded (or has failed) and earlier requests
    /// are done, `done` runs before this returns. Otherwise the request is
    /// queued and `done` runs on whichever thread replays the queue, after
    /// every request submitted before it.
    pub fn check<F>(&self, tree: Node, mut file: SourceFile, done: F)
    where
        F: FnOnce(Result<(), LoadError>, SourceFile) + Send + 'static,
    {
        let mut guard = self.session.lock();
        let session = &mut *guard;

        let result = match &session.gate {
            Gate::Ready(speller) if !session.flushing => {
                Walker::new(&self.config, &**speller, &mut session.cache).run(&tree, &mut file);
                Ok(())
            }
            Gate::Failed(error) if !session.flushing => Err(error.clone()),
            _ => {
                log::trace!("queueing request {}", session.queue.len() + 1);
                session.queue.push_back(Pending {
                    tree,
                    file,
                    done: Box::new(done),
                });
                return;
            }
        };

        drop(guard);
        done(result, file);
    }
}

/// Opens the gate and replays the queue in order. Requests arriving
/// meanwhile join the back of the queue; no callback runs under the lock.
fn complete(session: &Mutex<Session>, config: &Config, result: Result<SharedSpeller, LoadError>) {
    {
        let mut session = session.lock();

        if !matches!(session.gate, Gate::Loading) {
            return;
        }

        session.gate = match &result {
            Ok(speller) => Gate::Ready(Arc::clone(speller)),
            Err(error) => Gate::Failed(error.clone()),
        };
        session.flushing = true;

        match &result {
            Ok(_) => log::debug!(
                "dictionary loaded, replaying {} request(s)",
                session.queue.len()
            ),
            Err(error) => log::warn!(
                "dictionary failed to load, failing {} request(s): {}",
                session.queue.len(),
                error
            ),
        }
    }

    loop {
        let mut guard = session.lock();
        let session = &mut *guard;

        let Pending {
            tree,
            mut file,
            done,
        } = match session.queue.pop_front() {
            Some(pending) => pending,
            None => {
                session.flushing = false;
                return;
            }
        };

        let outcome = match &result {
            Ok(speller) => {
                Walker::new(config, &**speller, &mut session.cache).run(&tree, &mut file);
                Ok(())
            }
            Err(error) => Err(error.clone()),
        };

        drop(guard);
        done(outcome, file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DictionarySource, LoadCallback, WordList};
    use crate::tokenizer::parse;
    use std::sync::mpsc;

    type Outcomes = Arc<Mutex<Vec<(usize, Result<(), String>, Vec<String>)>>>;

    fn record(outcomes: &Outcomes, id: usize) -> impl FnOnce(Result<(), LoadError>, SourceFile) + Send {
        let outcomes = Arc::clone(outcomes);
        move |result, file| {
            outcomes.lock().push((
                id,
                result.map_err(|e| e.to_string()),
                file.messages.iter().map(ToString::to_string).collect(),
            ))
        }
    }

    /// A session whose loader parks its completion for the test to call.
    fn deferred() -> (Spell, Arc<Mutex<Option<LoadCallback>>>) {
        let slot = Arc::new(Mutex::new(None));
        let parked = Arc::clone(&slot);
        let spell = Spell::new(SpellOptions::from_loader(move |done| {
            *parked.lock() = Some(done);
        }))
        .unwrap();

        (spell, slot)
    }

    #[test]
    fn missing_dictionary() {
        assert!(matches!(
            Spell::new(SpellOptions::default()),
            Err(ConfigError::MissingDictionary)
        ));
    }

    #[test]
    fn ready_checks_run_immediately() {
        let spell = Spell::new(Box::new(WordList::new("colour\nand\n"))).unwrap();
        assert_eq!(spell.state(), State::Ready);

        let outcomes = Outcomes::default();
        spell.check(parse("colour and color"), SourceFile::new(), record(&outcomes, 1));

        let outcomes = outcomes.lock();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].1, Ok(()));
        assert_eq!(
            outcomes[0].2,
            vec!["1:12-1:17: `color` is misspelt; did you mean `colour`?"]
        );
    }

    #[test]
    fn queued_requests_replay_in_order() {
        let (spell, slot) = deferred();
        let outcomes = Outcomes::default();

        spell.check(parse("one"), SourceFile::new(), record(&outcomes, 1));
        spell.check(parse("two"), SourceFile::new(), record(&outcomes, 2));
        spell.check(parse("three"), SourceFile::new(), record(&outcomes, 3));

        assert_eq!(spell.state(), State::Loading);
        assert!(outcomes.lock().is_empty());

        let done = slot.lock().take().unwrap();
        done(Ok(Box::new(WordList::new("one\nthree\n"))));

        assert_eq!(spell.state(), State::Ready);
        let outcomes = outcomes.lock();
        assert_eq!(
            outcomes.iter().map(|(id, _, _)| *id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(outcomes.iter().all(|(_, result, _)| result.is_ok()));
        assert!(outcomes[0].2.is_empty());
        assert_eq!(outcomes[1].2, vec!["1:1-1:4: `two` is misspelt"]);
        assert!(outcomes[2].2.is_empty());
    }

    #[test]
    fn failed_load_reaches_every_request() {
        let (spell, slot) = deferred();
        let outcomes = Outcomes::default();

        spell.check(parse("one"), SourceFile::new(), record(&outcomes, 1));
        spell.check(parse("two"), SourceFile::new(), record(&outcomes, 2));

        let done = slot.lock().take().unwrap();
        done(Err(LoadError::loader("load error")));

        assert_eq!(spell.state(), State::Failed);
        spell.check(parse("three"), SourceFile::new(), record(&outcomes, 3));

        let outcomes = outcomes.lock();
        assert_eq!(outcomes.len(), 3);
        for (_, result, messages) in outcomes.iter() {
            assert_eq!(result, &Err("load error".to_string()));
            assert!(messages.is_empty());
        }
    }

    #[test]
    fn malformed_dictionary_fails_the_session() {
        let spell = Spell::new(Box::new(WordList::new(vec![0xff, 0xfe]))).unwrap();
        assert_eq!(spell.state(), State::Failed);

        let outcomes = Outcomes::default();
        spell.check(parse("one"), SourceFile::new(), record(&outcomes, 1));
        assert!(outcomes.lock()[0].1.is_err());
    }

    #[test]
    fn check_from_callback_waits_behind_queue() {
        let (spell, slot) = deferred();
        let outcomes = Outcomes::default();

        let again = spell.clone();
        let inner = Arc::clone(&outcomes);
        spell.check(parse("one"), SourceFile::new(), move |result, _| {
            assert!(result.is_ok());
            again.check(parse("two"), SourceFile::new(), record(&inner, 2));
        });
        spell.check(parse("three"), SourceFile::new(), record(&outcomes, 3));

        let done = slot.lock().take().unwrap();
        done(Ok(Box::new(WordList::new("one\ntwo\nthree\n"))));

        let ids = outcomes.lock().iter().map(|(id, _, _)| *id).collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 2]);

        // replay is over, so checks run in place again
        spell.check(parse("four"), SourceFile::new(), record(&outcomes, 4));
        assert_eq!(outcomes.lock().last().map(|(id, _, _)| *id), Some(4));
        assert!(!spell.session.lock().flushing);
    }

    #[test]
    fn failed_replay_keeps_order_for_late_checks() {
        let (spell, slot) = deferred();
        let outcomes = Outcomes::default();

        let again = spell.clone();
        let inner = Arc::clone(&outcomes);
        spell.check(parse("one"), SourceFile::new(), move |result, file| {
            record(&inner, 1)(result, file);
            again.check(parse("three"), SourceFile::new(), record(&inner, 3));
        });
        spell.check(parse("two"), SourceFile::new(), record(&outcomes, 2));

        let done = slot.lock().take().unwrap();
        done(Err(LoadError::loader("load error")));

        let outcomes = outcomes.lock();
        assert_eq!(
            outcomes.iter().map(|(id, _, _)| *id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(outcomes.iter().all(|(_, result, _)| result.is_err()));
    }

    #[test]
    fn same_document_twice() {
        let spell = Spell::new(SpellOptions::new(DictionarySource::dictionary(WordList::new(
            "colour\nand\n",
        ))))
        .unwrap();
        let outcomes = Outcomes::default();

        spell.check(parse("colour and color"), SourceFile::new(), record(&outcomes, 1));
        spell.check(parse("colour and color"), SourceFile::new(), record(&outcomes, 2));

        let outcomes = outcomes.lock();
        assert_eq!(outcomes[0].2, outcomes[1].2);
    }

    #[test]
    fn load_on_another_thread() {
        let spell = Spell::new(SpellOptions::from_loader(|done| {
            std::thread::spawn(move || done(Ok(Box::new(WordList::new("colour\n")))));
        }))
        .unwrap();

        let (tx, rx) = mpsc::channel();
        spell.check(parse("color"), SourceFile::new(), move |result, file| {
            tx.send((result.is_ok(), file.messages.len())).unwrap();
        });

        assert_eq!(rx.recv().unwrap(), (true, 1));
        assert_eq!(spell.state(), State::Ready);
    }

    #[test]
    fn dropped_session_ignores_late_load() {
        let (spell, slot) = deferred();
        drop(spell);

        let done = slot.lock().take().unwrap();
        done(Ok(Box::new(WordList::new("one\n"))));
    }
}
