//! The shift-reduce loop.

use super::input::TokenSource;
use super::table::{Action, Lookahead, ParseTable, State, StateId};
use super::LalrConfig;
use crate::error::{Error, Fault, UnexpectedToken};
use crate::grammar::{Reduction, Rule, RuleId, Token};
use tracing::{debug, trace};

const TARGET: &str = "lalr_rt::parser";

/// Immutable data one parse runs against
pub(super) struct ParseContext<'a, V> {
    pub table: &'a ParseTable,
    pub rules: &'a [Rule],
    pub reductions: &'a [Reduction<V>],
    pub start_state: StateId,
    pub end_state: StateId,
    pub config: &'a LalrConfig,
}

/// Mutable state of one parse: both stacks, the input and the observer.
///
/// `states` always holds exactly one entry more than `values`, the start
/// state at the bottom.
struct Run<'a, V, S, O> {
    ctx: &'a ParseContext<'a, V>,
    source: S,
    observer: O,
    states: Vec<StateId>,
    values: Vec<V>,
    last_line: Option<usize>,
    last_column: Option<usize>,
}

/// Parse everything `source` yields.
pub(super) fn parse<V, S, O>(
    ctx: &ParseContext<'_, V>,
    source: S,
    observer: O,
) -> Result<V, Error<S::Item>>
where
    S: TokenSource,
    V: From<S::Item>,
    O: FnMut(StateId),
{
    let span = tracing::debug_span!(target: TARGET, "parse", start = %ctx.start_state);
    let _enter = span.enter();

    let mut run = Run {
        ctx,
        source,
        observer,
        states: Vec::new(),
        values: Vec::new(),
        last_line: None,
        last_column: None,
    };
    run.push_state(ctx.start_state);
    run.drive()
}

impl<V, S, O> Run<'_, V, S, O>
where
    S: TokenSource,
    V: From<S::Item>,
    O: FnMut(StateId),
{
    fn drive(&mut self) -> Result<V, Error<S::Item>> {
        let mut lookahead = self.source.next_token();
        while let Some(token) = lookahead.take() {
            let Some(action) = self.current()?.action(token.kind()) else {
                let symbol = Lookahead::symbol(token.kind());
                return Err(self.unexpected(Some(token), symbol));
            };
            match action {
                Action::Shift(next) if next == self.ctx.end_state => {
                    return Err(Fault::AcceptMidStream {
                        state: self.top(),
                        lookahead: Lookahead::symbol(token.kind()),
                    }
                    .into());
                }
                Action::Shift(next) => {
                    trace!(target: TARGET, kind = token.kind(), state = %next, "shift");
                    self.last_line = token.line();
                    self.last_column = token.column();
                    self.values.push(V::from(token));
                    self.push_state(next);
                    lookahead = self.source.next_token();
                }
                Action::Reduce { rule, len } => {
                    self.reduce(rule, len)?;
                    lookahead = Some(token);
                }
            }
        }

        loop {
            match self.current()?.end_action() {
                None => return Err(self.unexpected(None, Lookahead::End)),
                Some(Action::Shift(next)) if next != self.ctx.end_state => {
                    return Err(Fault::WrongAcceptState {
                        found: next,
                        expected: self.ctx.end_state,
                    }
                    .into());
                }
                Some(Action::Shift(_)) => return self.accept(),
                Some(Action::Reduce { rule, len }) => self.reduce(rule, len)?,
            }
        }
    }

    fn top(&self) -> StateId {
        // The start state is never popped.
        self.states.last().copied().unwrap_or(self.ctx.start_state)
    }

    fn current(&self) -> Result<&State, Fault> {
        let top = self.top();
        self.ctx.table.state(top).ok_or(Fault::UnknownState(top))
    }

    fn push_state(&mut self, state: StateId) {
        self.states.push(state);
        (self.observer)(state);
    }

    fn reduce(&mut self, rule: RuleId, len: usize) -> Result<(), Error<S::Item>> {
        let depth = self.values.len();
        if len > depth {
            return Err(Fault::StackUnderflow { rule, len, depth }.into());
        }
        let ctx = self.ctx;
        let definition = ctx.rules.get(rule.index()).ok_or(Fault::UnknownRule(rule))?;
        let reduction = ctx
            .reductions
            .get(rule.index())
            .ok_or(Fault::UnknownRule(rule))?;

        let children = self.values.split_off(depth - len);
        self.states.truncate(self.states.len() - len);
        trace!(target: TARGET, %rule, origin = %definition.origin, len, "reduce");

        let value = reduction(children).map_err(|source| Error::Reduce {
            rule: definition.callback_name().clone(),
            source,
        })?;

        let state = self.top();
        match self.current()?.action(definition.origin.as_str()) {
            Some(Action::Shift(next)) if next == ctx.end_state => {
                Err(Fault::AcceptMidStream {
                    state,
                    lookahead: Lookahead::Symbol(definition.origin.clone()),
                }
                .into())
            }
            Some(Action::Shift(next)) => {
                trace!(target: TARGET, from = %state, to = %next, "goto");
                self.values.push(value);
                self.push_state(next);
                Ok(())
            }
            Some(Action::Reduce { .. }) => Err(Fault::GotoNotShift {
                state,
                symbol: definition.origin.clone(),
            }
            .into()),
            None => Err(Fault::MissingGoto {
                state,
                symbol: definition.origin.clone(),
            }
            .into()),
        }
    }

    fn accept(&mut self) -> Result<V, Error<S::Item>> {
        let count = self.values.len();
        match self.values.pop() {
            Some(value) if count == 1 => {
                debug!(target: TARGET, "accepted");
                Ok(value)
            }
            _ => Err(Fault::LeftoverValues { count }.into()),
        }
    }

    fn unexpected(&self, token: Option<S::Item>, lookahead: Lookahead) -> Error<S::Item> {
        let state = self.top();
        let expected = self
            .ctx
            .table
            .state(state)
            .map(State::expected)
            .unwrap_or_default();
        let (line, column) = match &token {
            Some(token) => (token.line(), token.column()),
            None => (self.last_line, self.last_column),
        };
        debug!(target: TARGET, %state, %lookahead, "unexpected token");
        UnexpectedToken {
            token,
            lookahead,
            state,
            expected,
            line,
            column,
            context: self.source.context(self.ctx.config.context_window),
        }
        .into()
    }
}
