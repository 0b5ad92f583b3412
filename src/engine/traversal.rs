// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Core traversal algorithm.
//!
//! [`traverse`] runs a [`GraphDescriptor`] to completion against a
//! [`TraversalContext`] and returns the graph's final output values.
//!
//! ## Execution Strategy
//!
//! 1. **Validation**: the graph is checked for duplicate ids, dangling edges,
//!    unnamed edge inputs and cycles before any handler runs. A cycle fails with
//!    [`TraversalError::CyclicGraph`]; there is no implicit looping.
//! 2. **Readiness**: every node starts with an in-degree equal to its number of
//!    incoming edges. Delivering an edge value decrements it; at zero the node is
//!    pushed onto a [`ReadyQueue`]. Nodes with no incoming edges are ready at once.
//! 3. **Sequential dispatch**: the earliest-declared ready node runs next. Its
//!    inputs are its configuration overlaid with the values delivered on its
//!    edges, so a wired value always wins over configuration for the same key.
//! 4. **Routing**: each outgoing edge copies one output key into the
//!    destination's pending inputs. A key the node didn't produce is a wiring
//!    defect ([`TraversalError::MissingOutputKey`]).
//!
//! ## Boundary Nodes
//!
//! Two node types are executed by the algorithm itself rather than a handler:
//!
//! - `input` asks the context for external input. The requested keys are the
//!   output keys its outgoing edges read. Supplied values overlay the node's
//!   inputs and become its outputs.
//! - `output` hands its inputs to the context's external output and adds them to
//!   the map `traverse` returns. It also passes them on to any downstream edges.
//!
//! A graph with no `output` node therefore returns an empty map and never calls
//! `provide_external_output`.
//!
//! ## Determinism
//!
//! Node execution order depends only on the graph: same document and
//! deterministic handlers give the same order and the same outputs.

use futures::future::BoxFuture;
use std::collections::HashMap;
use std::time::Instant;
use tracing::Instrument;

use crate::config::consts::{INPUT_NODE_TYPE, OUTPUT_NODE_TYPE};
use crate::config::{validate_graph, Edge, GraphDescriptor, InputValues, NodeDescriptor, OutputValues};
use crate::engine::ready_queue::{ReadyNode, ReadyQueue};
use crate::errors::TraversalError;
use crate::observability::messages::engine::{TraversalCompleted, TraversalRejected, TraversalStarted};
use crate::observability::messages::node::{BoundaryExchange, NodeExecutionFailed};
use crate::observability::messages::StructuredLog;
use crate::traits::TraversalContext;

/// Execute `graph` to completion and return its final output values.
///
/// The returned future is boxed so handlers (such as `include`) can call
/// `traverse` recursively on a nested graph.
///
/// # Example
///
/// ```
/// use boardwalk::config::{Edge, EngineConfig, GraphDescriptor, InputValues, NodeDescriptor, RuntimeBuilder};
/// use boardwalk::engine::{traverse, BaseTraversalContext, FixedInput};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// # tokio_test();
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn tokio_test() {
/// let graph = GraphDescriptor::new()
///     .with_node(NodeDescriptor::new("in", "input"))
///     .with_node(NodeDescriptor::new("flip", "reverse_text"))
///     .with_node(NodeDescriptor::new("out", "output"))
///     .with_edge(Edge::new("in", "text", "flip", "text"))
///     .with_edge(Edge::new("flip", "text", "out", "text"));
///
/// let context = BaseTraversalContext::new(RuntimeBuilder::from_config(&EngineConfig::default()))
///     .with_input_source(Arc::new(FixedInput::new(InputValues::from([(
///         "text".to_string(),
///         json!("stressed"),
///     )]))));
///
/// let outputs = traverse(&context, &graph).await.unwrap();
/// assert_eq!(outputs["text"], json!("desserts"));
/// # }
/// ```
pub fn traverse<'a>(
    context: &'a dyn TraversalContext,
    graph: &'a GraphDescriptor,
) -> BoxFuture<'a, Result<OutputValues, TraversalError>> {
    let span = tracing::info_span!("traverse", graph = %graph.label());
    Box::pin(execute_graph(context, graph).instrument(span))
}

async fn execute_graph(
    context: &dyn TraversalContext,
    graph: &GraphDescriptor,
) -> Result<OutputValues, TraversalError> {
    let label = graph.label();

    if let Err(errors) = validate_graph(graph) {
        let error = TraversalError::from(errors);
        TraversalRejected {
            graph: &label,
            error: &error,
        }
        .log();
        return Err(error);
    }

    TraversalStarted {
        graph: &label,
        node_count: graph.nodes.len(),
        edge_count: graph.edges.len(),
        include_depth: context.include_chain().len(),
    }
    .log();

    let started = Instant::now();
    let plan = TraversalPlan::new(graph);
    let mut remaining = plan.in_degree.clone();
    let mut pending: Vec<InputValues> = vec![InputValues::new(); graph.nodes.len()];
    let mut graph_outputs = OutputValues::new();
    let mut nodes_executed = 0;

    let mut queue = ReadyQueue::new();
    for (index, node) in graph.nodes.iter().enumerate() {
        if remaining[index] == 0 {
            queue.push(ReadyNode::new(index, node.id.clone()));
        }
    }

    while let Some(ready) = queue.pop() {
        let index = ready.declaration_index;
        let node = &graph.nodes[index];
        let inputs = merge_inputs(node, std::mem::take(&mut pending[index]));

        let outputs = execute_node(context, &plan, index, inputs, &mut graph_outputs).await?;
        nodes_executed += 1;

        for &(target, edge) in &plan.outgoing[index] {
            deliver(node, edge, &outputs, &mut pending[target])?;
            remaining[target] -= 1;
            if remaining[target] == 0 {
                queue.push(ReadyNode::new(target, graph.nodes[target].id.clone()));
            }
        }
    }

    TraversalCompleted {
        graph: &label,
        nodes_executed,
        output_count: graph_outputs.len(),
        duration: started.elapsed(),
    }
    .log();

    Ok(graph_outputs)
}

/// Index structures derived once per run from a validated graph.
struct TraversalPlan<'g> {
    graph: &'g GraphDescriptor,
    /// Per node: `(destination index, edge)` in edge declaration order
    outgoing: Vec<Vec<(usize, &'g Edge)>>,
    /// Per node: number of incoming edges
    in_degree: Vec<usize>,
}

impl<'g> TraversalPlan<'g> {
    fn new(graph: &'g GraphDescriptor) -> Self {
        let index_of: HashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.as_str(), index))
            .collect();

        let mut outgoing = vec![Vec::new(); graph.nodes.len()];
        let mut in_degree = vec![0; graph.nodes.len()];

        for edge in &graph.edges {
            let endpoints = (
                index_of.get(edge.from.node.as_str()),
                index_of.get(edge.to.node.as_str()),
            );
            if let (Some(&source), Some(&target)) = endpoints {
                outgoing[source].push((target, edge));
                in_degree[target] += 1;
            }
        }

        Self {
            graph,
            outgoing,
            in_degree,
        }
    }

    /// Output keys downstream edges will read from node `index`, sorted and deduplicated.
    fn requested_keys(&self, index: usize) -> Vec<String> {
        let mut keys: Vec<String> = self.outgoing[index]
            .iter()
            .filter(|(_, edge)| !edge.is_wildcard())
            .map(|(_, edge)| edge.from.output.clone())
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

fn merge_inputs(node: &NodeDescriptor, delivered: InputValues) -> InputValues {
    let mut inputs = node.configuration.clone();
    inputs.extend(delivered);
    inputs
}

fn deliver(
    node: &NodeDescriptor,
    edge: &Edge,
    outputs: &OutputValues,
    slot: &mut InputValues,
) -> Result<(), TraversalError> {
    if edge.is_wildcard() {
        slot.extend(outputs.iter().map(|(k, v)| (k.clone(), v.clone())));
        return Ok(());
    }

    let value = outputs
        .get(&edge.from.output)
        .ok_or_else(|| TraversalError::MissingOutputKey {
            node_id: node.id.clone(),
            key: edge.from.output.clone(),
            to_node: edge.to.node.clone(),
        })?;
    slot.insert(edge.to.input.clone(), value.clone());
    Ok(())
}

/// Run one node, bracketing it with the context's progress callbacks.
async fn execute_node(
    context: &dyn TraversalContext,
    plan: &TraversalPlan<'_>,
    index: usize,
    inputs: InputValues,
    graph_outputs: &mut OutputValues,
) -> Result<OutputValues, TraversalError> {
    let node = &plan.graph.nodes[index];
    let completion = context.report_progress(node);

    let result = dispatch(context, plan, index, inputs, graph_outputs).await;
    completion();

    if let Err(error) = &result {
        NodeExecutionFailed {
            node_id: &node.id,
            node_type: &node.node_type,
            error,
        }
        .log();
    }
    result
}

async fn dispatch(
    context: &dyn TraversalContext,
    plan: &TraversalPlan<'_>,
    index: usize,
    inputs: InputValues,
    graph_outputs: &mut OutputValues,
) -> Result<OutputValues, TraversalError> {
    let node = &plan.graph.nodes[index];

    match node.node_type.as_str() {
        INPUT_NODE_TYPE => {
            let keys = plan.requested_keys(index);
            BoundaryExchange {
                node_id: &node.id,
                direction: "requesting",
                keys: &keys,
            }
            .log();

            let supplied = context.request_external_input(&keys).await?;
            let mut outputs = inputs;
            outputs.extend(supplied);
            Ok(outputs)
        }
        OUTPUT_NODE_TYPE => {
            let mut keys: Vec<String> = inputs.keys().cloned().collect();
            keys.sort();
            BoundaryExchange {
                node_id: &node.id,
                direction: "delivering",
                keys: &keys,
            }
            .log();

            context.provide_external_output(inputs.clone()).await?;
            graph_outputs.extend(inputs.iter().map(|(k, v)| (k.clone(), v.clone())));
            Ok(inputs)
        }
        node_type => {
            let handler = context
                .resolve_handler(node_type)
                .map_err(|e| e.at_node(&node.id))?;
            handler.handle(context, inputs).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{
        CountingInputSource, EmptyOutputHandler, FailingHandler, RecordingHandler,
        RecordingOutputSink, RecordingProgressSink,
    };
    use crate::config::HandlerRegistry;
    use crate::engine::BaseTraversalContext;
    use serde_json::json;
    use std::sync::Arc;

    fn labeled(id: &str) -> NodeDescriptor {
        NodeDescriptor::new(id, "record").with_config("label", json!(id))
    }

    fn context_with(recorder: &RecordingHandler) -> BaseTraversalContext {
        BaseTraversalContext::new(
            HandlerRegistry::new()
                .with("record", Arc::new(recorder.clone()))
                .with("empty", Arc::new(EmptyOutputHandler))
                .with("fail", Arc::new(FailingHandler)),
        )
    }

    #[tokio::test]
    async fn visits_each_node_exactly_once() {
        let recorder = RecordingHandler::echo();
        // diamond a -> (b, c) -> d plus an isolated e
        let graph = GraphDescriptor::new()
            .with_node(labeled("a"))
            .with_node(labeled("b"))
            .with_node(labeled("c"))
            .with_node(labeled("d"))
            .with_node(labeled("e"))
            .with_edge(Edge::new("a", "label", "b", "from_a"))
            .with_edge(Edge::new("a", "label", "c", "from_a"))
            .with_edge(Edge::new("b", "label", "d", "from_b"))
            .with_edge(Edge::new("c", "label", "d", "from_c"));

        traverse(&context_with(&recorder), &graph).await.unwrap();

        let mut labels = recorder.labels();
        assert_eq!(labels.len(), 5);
        labels.sort();
        assert_eq!(labels, vec!["a", "b", "c", "d", "e"]);
    }

    #[tokio::test]
    async fn producers_run_before_consumers_and_ties_follow_declaration() {
        let recorder = RecordingHandler::echo();
        // declared consumer-first to prove ordering comes from edges
        let graph = GraphDescriptor::new()
            .with_node(labeled("sink"))
            .with_node(labeled("n1"))
            .with_node(labeled("n2"))
            .with_edge(Edge::new("n2", "label", "sink", "second"))
            .with_edge(Edge::new("n1", "label", "sink", "first"));

        traverse(&context_with(&recorder), &graph).await.unwrap();

        assert_eq!(recorder.labels(), vec!["n1", "n2", "sink"]);
    }

    #[tokio::test]
    async fn independent_nodes_run_in_declaration_order() {
        let recorder = RecordingHandler::echo();
        let graph = GraphDescriptor::new()
            .with_node(labeled("N1"))
            .with_node(labeled("N2"));

        traverse(&context_with(&recorder), &graph).await.unwrap();

        assert_eq!(recorder.labels(), vec!["N1", "N2"]);
    }

    #[tokio::test]
    async fn edge_values_override_configuration() {
        let recorder = RecordingHandler::echo();
        let graph = GraphDescriptor::new()
            .with_node(labeled("src").with_config("value", json!("wired")))
            .with_node(
                labeled("dst")
                    .with_config("value", json!("configured"))
                    .with_config("extra", json!(7)),
            )
            .with_edge(Edge::new("src", "value", "dst", "value"));

        traverse(&context_with(&recorder), &graph).await.unwrap();

        let invocations = recorder.invocations();
        let dst = &invocations[1];
        assert_eq!(dst["value"], json!("wired"));
        assert_eq!(dst["extra"], json!(7));
        assert_eq!(dst["label"], json!("dst"));
        assert_eq!(dst.len(), 3);
    }

    #[tokio::test]
    async fn node_inputs_are_exactly_config_plus_direct_upstream_values() {
        let recorder = RecordingHandler::echo();
        // a -> b -> c; c must not see a's values unless b forwards them
        let graph = GraphDescriptor::new()
            .with_node(labeled("a").with_config("secret", json!("a-only")))
            .with_node(labeled("b"))
            .with_node(labeled("c"))
            .with_edge(Edge::new("a", "label", "b", "upstream"))
            .with_edge(Edge::new("b", "label", "c", "upstream"));

        traverse(&context_with(&recorder), &graph).await.unwrap();

        let c = &recorder.invocations()[2];
        assert_eq!(c.get("secret"), None);
        assert_eq!(c["upstream"], json!("b"));
    }

    #[tokio::test]
    async fn cyclic_graph_rejected_before_any_handler_runs() {
        let recorder = RecordingHandler::echo();
        let graph = GraphDescriptor::new()
            .with_node(labeled("A"))
            .with_node(labeled("B"))
            .with_edge(Edge::new("A", "label", "B", "x"))
            .with_edge(Edge::new("B", "label", "A", "x"));

        let result = traverse(&context_with(&recorder), &graph).await;

        assert!(matches!(result, Err(TraversalError::CyclicGraph { .. })));
        assert_eq!(recorder.invocations().len(), 0);
    }

    #[tokio::test]
    async fn cycle_downstream_of_entry_still_rejected_up_front() {
        let recorder = RecordingHandler::echo();
        let graph = GraphDescriptor::new()
            .with_node(labeled("entry"))
            .with_node(labeled("a"))
            .with_node(labeled("b"))
            .with_edge(Edge::new("entry", "label", "a", "x"))
            .with_edge(Edge::new("a", "label", "b", "x"))
            .with_edge(Edge::new("b", "label", "a", "y"));

        let result = traverse(&context_with(&recorder), &graph).await;

        match result {
            Err(TraversalError::CyclicGraph { cycle }) => assert_eq!(cycle, vec!["a", "b", "a"]),
            other => panic!("expected cyclic graph error, got {:?}", other),
        }
        assert!(recorder.invocations().is_empty());
    }

    #[tokio::test]
    async fn missing_output_key_names_key_and_node() {
        let recorder = RecordingHandler::echo();
        let graph = GraphDescriptor::new()
            .with_node(NodeDescriptor::new("producer", "empty"))
            .with_node(labeled("consumer"))
            .with_edge(Edge::new("producer", "foo", "consumer", "bar"));

        let result = traverse(&context_with(&recorder), &graph).await;

        match result {
            Err(TraversalError::MissingOutputKey {
                node_id,
                key,
                to_node,
            }) => {
                assert_eq!(node_id, "producer");
                assert_eq!(key, "foo");
                assert_eq!(to_node, "consumer");
            }
            other => panic!("expected missing output key, got {:?}", other),
        }
        assert!(recorder.invocations().is_empty());
    }

    #[tokio::test]
    async fn unknown_node_type_names_node() {
        let recorder = RecordingHandler::echo();
        let graph = GraphDescriptor::new().with_node(NodeDescriptor::new("mystery", "unregistered"));

        let result = traverse(&context_with(&recorder), &graph).await;

        match result {
            Err(TraversalError::UnknownNodeType { node_type, node_id }) => {
                assert_eq!(node_type, "unregistered");
                assert_eq!(node_id.as_deref(), Some("mystery"));
            }
            other => panic!("expected unknown node type, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn handler_failures_propagate_and_stop_the_run() {
        let recorder = RecordingHandler::echo();
        let progress = Arc::new(RecordingProgressSink::default());
        let graph = GraphDescriptor::new()
            .with_node(NodeDescriptor::new("boom", "fail"))
            .with_node(labeled("after"));

        let context = context_with(&recorder).with_progress_sink(progress.clone());
        let result = traverse(&context, &graph).await;

        match result {
            Err(TraversalError::Handler(e)) => assert!(e.to_string().contains("simulated")),
            other => panic!("expected handler error, got {:?}", other),
        }
        assert!(recorder.invocations().is_empty());
        // completion callback fires even for the failed node
        assert_eq!(progress.started(), vec!["boom"]);
        assert_eq!(progress.completed(), 1);
    }

    #[tokio::test]
    async fn input_node_requests_keys_read_by_its_edges() {
        let recorder = RecordingHandler::echo();
        let input = Arc::new(CountingInputSource::new(InputValues::from([
            ("b".to_string(), json!(2)),
            ("a".to_string(), json!(1)),
        ])));
        let graph = GraphDescriptor::new()
            .with_node(NodeDescriptor::new("in", "input").with_config("a", json!("default")))
            .with_node(labeled("use"))
            .with_edge(Edge::new("in", "b", "use", "b"))
            .with_edge(Edge::new("in", "a", "use", "a"))
            .with_edge(Edge::new("in", "a", "use", "a_again"));

        let context = context_with(&recorder).with_input_source(input.clone());
        traverse(&context, &graph).await.unwrap();

        assert_eq!(input.requests(), vec![vec!["a".to_string(), "b".to_string()]]);
        let used = &recorder.invocations()[0];
        assert_eq!(used["a"], json!(1));
        assert_eq!(used["a_again"], json!(1));
        assert_eq!(used["b"], json!(2));
    }

    #[tokio::test]
    async fn input_node_configuration_acts_as_default() {
        let recorder = RecordingHandler::echo();
        let input = Arc::new(CountingInputSource::new(InputValues::new()));
        let graph = GraphDescriptor::new()
            .with_node(NodeDescriptor::new("in", "input").with_config("tone", json!("formal")))
            .with_node(labeled("use"))
            .with_edge(Edge::new("in", "tone", "use", "tone"));

        let context = context_with(&recorder).with_input_source(input);
        traverse(&context, &graph).await.unwrap();

        assert_eq!(recorder.invocations()[0]["tone"], json!("formal"));
    }

    #[tokio::test]
    async fn output_nodes_deliver_and_accumulate_final_values() {
        let recorder = RecordingHandler::echo();
        let sink = Arc::new(RecordingOutputSink::default());
        let graph = GraphDescriptor::new()
            .with_node(labeled("src").with_config("x", json!(1)).with_config("y", json!(2)))
            .with_node(NodeDescriptor::new("out_x", "output"))
            .with_node(NodeDescriptor::new("out_y", "output"))
            .with_edge(Edge::new("src", "x", "out_x", "x"))
            .with_edge(Edge::new("src", "y", "out_y", "y"));

        let context = context_with(&recorder).with_output_sink(sink.clone());
        let outputs = traverse(&context, &graph).await.unwrap();

        assert_eq!(
            outputs,
            OutputValues::from([("x".to_string(), json!(1)), ("y".to_string(), json!(2))])
        );
        let deliveries = sink.deliveries();
        assert_eq!(deliveries.len(), 2);
        assert_eq!(deliveries[0], OutputValues::from([("x".to_string(), json!(1))]));
    }

    #[tokio::test]
    async fn graph_without_output_node_returns_empty_map() {
        let recorder = RecordingHandler::echo();
        let sink = Arc::new(RecordingOutputSink::default());
        let graph = GraphDescriptor::new().with_node(labeled("only"));

        let context = context_with(&recorder).with_output_sink(sink.clone());
        let outputs = traverse(&context, &graph).await.unwrap();

        assert!(outputs.is_empty());
        assert!(sink.deliveries().is_empty());
    }

    #[tokio::test]
    async fn wildcard_edge_forwards_every_output() {
        let recorder = RecordingHandler::echo();
        let graph = GraphDescriptor::new()
            .with_node(labeled("src").with_config("p", json!("P")).with_config("q", json!("Q")))
            .with_node(NodeDescriptor::new("out", "output"))
            .with_edge(Edge::wildcard("src", "out"));

        let outputs = traverse(&context_with(&recorder), &graph).await.unwrap();

        assert_eq!(outputs["p"], json!("P"));
        assert_eq!(outputs["q"], json!("Q"));
        assert_eq!(outputs["label"], json!("src"));
    }

    #[tokio::test]
    async fn progress_brackets_every_node_in_execution_order() {
        let recorder = RecordingHandler::echo();
        let progress = Arc::new(RecordingProgressSink::default());
        let graph = GraphDescriptor::new()
            .with_node(labeled("second"))
            .with_node(labeled("first"))
            .with_edge(Edge::new("first", "label", "second", "x"));

        let context = context_with(&recorder).with_progress_sink(progress.clone());
        traverse(&context, &graph).await.unwrap();

        assert_eq!(progress.started(), vec!["first", "second"]);
        assert_eq!(progress.completed(), 2);
    }

    #[tokio::test]
    async fn repeated_runs_are_deterministic() {
        let graph = GraphDescriptor::new()
            .with_node(labeled("z"))
            .with_node(labeled("y"))
            .with_node(labeled("x"))
            .with_node(labeled("w"))
            .with_edge(Edge::new("x", "label", "w", "a"))
            .with_edge(Edge::new("z", "label", "w", "b"));

        let mut orders = Vec::new();
        for _ in 0..5 {
            let recorder = RecordingHandler::echo();
            traverse(&context_with(&recorder), &graph).await.unwrap();
            orders.push(recorder.labels());
        }

        assert!(orders.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(orders[0], vec!["z", "y", "x", "w"]);
    }

    #[tokio::test]
    async fn duplicate_ids_rejected_as_invalid_graph() {
        let recorder = RecordingHandler::echo();
        let graph = GraphDescriptor::new()
            .with_node(labeled("a"))
            .with_node(labeled("a"));

        let result = traverse(&context_with(&recorder), &graph).await;

        assert!(matches!(result, Err(TraversalError::InvalidGraph { .. })));
        assert!(recorder.invocations().is_empty());
    }

    #[tokio::test]
    async fn named_output_edge_without_target_input_is_rejected() {
        let recorder = RecordingHandler::echo();
        let graph: GraphDescriptor = serde_json::from_value(json!({
            "nodes": [
                { "id": "a", "type": "record", "configuration": { "text": "hi" } },
                { "id": "out", "type": "output" }
            ],
            "edges": [ { "from": { "node": "a", "output": "text" }, "to": { "node": "out" } } ]
        }))
        .unwrap();

        let result = traverse(&context_with(&recorder), &graph).await;

        match result {
            Err(TraversalError::InvalidGraph { errors }) => assert!(matches!(
                errors.as_slice(),
                [crate::errors::ValidationError::UnnamedEdgeInput { .. }]
            )),
            other => panic!("expected invalid graph, got {:?}", other),
        }
        assert!(recorder.invocations().is_empty());
    }
}
